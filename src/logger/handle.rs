//! The logger handle.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Local;

use crate::logger::context::{encode, Context, ContextError};
use crate::logger::{Level, LoggerConfig};
use crate::observability::metrics;
use crate::sink::{Record, Sink, StreamSink, SEPARATOR};

struct Shared {
    config: ArcSwap<LoggerConfig>,
    sink: Arc<dyn Sink>,
}

/// A named, leveled logger.
///
/// `Logger` is a view over shared state: clones are cheap and all of them
/// see level changes made through any clone or through the registry that
/// created it. Equality is identity.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
}

impl Logger {
    /// Standalone logger writing to stderr.
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_sink(config, Arc::new(StreamSink::stderr()))
    }

    pub fn with_sink(config: LoggerConfig, sink: Arc<dyn Sink>) -> Self {
        Self {
            shared: Arc::new(Shared {
                config: ArcSwap::from_pointee(config),
                sink,
            }),
        }
    }

    pub fn name(&self) -> String {
        self.shared.config.load().name.clone()
    }

    /// Snapshot of the current config.
    pub fn config(&self) -> LoggerConfig {
        LoggerConfig::clone(&self.shared.config.load())
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        self.shared.config.load().threshold()
    }

    /// Replace the threshold and rebind the config; returns the previous threshold.
    pub fn set_level(&self, level: Level) -> Level {
        let previous = self.shared.config.rcu(|current| {
            let mut next = LoggerConfig::clone(current);
            next.level = Some(level);
            next
        });
        previous.threshold()
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.enabled(level, &self.shared.config.load())
    }

    fn enabled(&self, level: Level, config: &LoggerConfig) -> bool {
        self.shared.sink.compare_levels(level, config.threshold()) != Ordering::Greater
    }

    /// Log at `level`, returning whether a line was handed to the sink.
    ///
    /// A failed sink write is reported through `tracing` and does not make
    /// the call fail. Nothing is formatted or encoded when `level` is disabled.
    pub fn try_log<C: Context + ?Sized>(
        &self,
        level: Level,
        ctx: &C,
        args: fmt::Arguments<'_>,
    ) -> Result<bool, ContextError> {
        let config = self.shared.config.load();
        if !self.enabled(level, &config) {
            return Ok(false);
        }

        let message = extend_message(ctx, args)?;
        let record = Record {
            name: &config.name,
            level,
            timestamp: Local::now(),
            message: &message,
            include_name: config.include_name,
            color: config.color,
        };
        let line = self.shared.sink.render(&record);
        match self.shared.sink.write(&line) {
            Ok(()) => metrics::record_line(level),
            Err(e) => {
                metrics::record_write_failure(level);
                tracing::warn!(logger = %config.name, error = %e, "Failed to write log line");
            }
        }
        Ok(true)
    }

    /// Log at `level`.
    ///
    /// # Panics
    ///
    /// Panics when `ctx` cannot be serialized.
    pub fn log<C: Context + ?Sized>(&self, level: Level, ctx: &C, args: fmt::Arguments<'_>) {
        if let Err(e) = self.try_log(level, ctx, args) {
            panic!("logger '{}': {}", self.name(), e);
        }
    }

    /// Log a critical message, if enabled.
    pub fn critical<C: Context + ?Sized>(&self, ctx: &C, args: fmt::Arguments<'_>) {
        self.log(Level::Critical, ctx, args)
    }

    /// Log an error message, if enabled.
    pub fn error<C: Context + ?Sized>(&self, ctx: &C, args: fmt::Arguments<'_>) {
        self.log(Level::Error, ctx, args)
    }

    /// Log a warning message, if enabled.
    pub fn warning<C: Context + ?Sized>(&self, ctx: &C, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, ctx, args)
    }

    /// Log a notice message, if enabled.
    pub fn notice<C: Context + ?Sized>(&self, ctx: &C, args: fmt::Arguments<'_>) {
        self.log(Level::Notice, ctx, args)
    }

    /// Log an info message, if enabled.
    pub fn info<C: Context + ?Sized>(&self, ctx: &C, args: fmt::Arguments<'_>) {
        self.log(Level::Info, ctx, args)
    }

    /// Log a debug message, if enabled.
    pub fn debug<C: Context + ?Sized>(&self, ctx: &C, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, ctx, args)
    }
}

/// Format the message and append the encoded context, if any.
fn extend_message<C: Context + ?Sized>(
    ctx: &C,
    args: fmt::Arguments<'_>,
) -> Result<String, ContextError> {
    let meta = encode(ctx)?;
    let mut message = fmt::format(args);
    if let Some(meta) = meta {
        message.push_str(SEPARATOR);
        message.push_str(&meta);
    }
    Ok(message)
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &**self.shared.config.load())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Ctx;
    use crate::sink::{render_plain, MemorySink};
    use ::metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
    use serde_json::Value;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
    use std::sync::Mutex;

    /// Context that counts how often it gets encoded.
    struct CountingCtx {
        encoded: Cell<usize>,
    }

    impl Context for CountingCtx {
        fn is_empty(&self) -> bool {
            false
        }

        fn to_json(&self) -> Result<Value, serde_json::Error> {
            self.encoded.set(self.encoded.get() + 1);
            Ok(serde_json::json!({"counted": true}))
        }
    }

    /// Sink whose writes always fail.
    struct BrokenSink;

    impl Sink for BrokenSink {
        fn render(&self, record: &Record<'_>) -> String {
            render_plain(record)
        }

        fn write(&self, _line: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }
    }

    /// Recorder keeping one counter per metric name, labels ignored.
    #[derive(Default)]
    struct CounterRecorder {
        counters: Mutex<HashMap<String, Arc<AtomicU64>>>,
    }

    impl CounterRecorder {
        fn value(&self, name: &str) -> u64 {
            self.counters
                .lock()
                .unwrap()
                .get(name)
                .map_or(0, |c| c.load(AtomicOrdering::SeqCst))
        }
    }

    impl Recorder for CounterRecorder {
        fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
        fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
        fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

        fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
            let counter = self
                .counters
                .lock()
                .unwrap()
                .entry(key.name().to_string())
                .or_default()
                .clone();
            Counter::from_arc(counter)
        }

        fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn memory_logger(level: Level) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(LoggerConfig::new("test").with_level(level), sink.clone());
        (logger, sink)
    }

    #[test]
    fn test_disabled_level_skips_encoding() {
        let (logger, sink) = memory_logger(Level::Error);
        let ctx = CountingCtx { encoded: Cell::new(0) };

        logger.info(&ctx, format_args!("ignored"));
        logger.debug(&ctx, format_args!("ignored"));
        assert_eq!(ctx.encoded.get(), 0);
        assert!(sink.is_empty());

        logger.error(&ctx, format_args!("kept"));
        assert_eq!(ctx.encoded.get(), 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_empty_context_adds_no_suffix() {
        let (logger, sink) = memory_logger(Level::Debug);
        logger.info(&Ctx::new(), format_args!("ready"));
        logger.info(&(), format_args!("ready {}", 2));

        let records = sink.records();
        assert_eq!(records[0].message, "ready");
        assert_eq!(records[1].message, "ready 2");
        assert!(sink.lines()[0].ends_with("| INFO | ready"));
    }

    #[test]
    fn test_context_appended_after_separator() {
        let (logger, sink) = memory_logger(Level::Debug);
        let ctx = Ctx::new().with("k", "v");
        logger.warning(&ctx, format_args!("took {}ms", 12));

        assert_eq!(sink.records()[0].message, r#"took 12ms | {"k":"v"}"#);
        assert_eq!(ctx, Ctx::new().with("k", "v"));
    }

    #[test]
    fn test_message_braces_are_not_reinterpreted() {
        let (logger, sink) = memory_logger(Level::Debug);
        let ctx = Ctx::new().with("pct", "100%");
        logger.notice(&ctx, format_args!("{}", "{literal}"));
        assert_eq!(sink.records()[0].message, r#"{literal} | {"pct":"100%"}"#);
    }

    #[test]
    fn test_threshold_boundaries() {
        let (logger, _) = memory_logger(Level::Warning);
        assert!(logger.is_enabled_for(Level::Critical));
        assert!(logger.is_enabled_for(Level::Error));
        assert!(logger.is_enabled_for(Level::Warning));
        assert!(!logger.is_enabled_for(Level::Notice));
        assert!(!logger.is_enabled_for(Level::Debug));
    }

    #[test]
    fn test_unset_level_enables_everything() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::with_sink(LoggerConfig::new("open"), sink.clone());
        logger.debug(&(), format_args!("verbose"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_clones_observe_level_changes() {
        let (logger, sink) = memory_logger(Level::Debug);
        let clone = logger.clone();

        let previous = logger.set_level(Level::Error);
        assert_eq!(previous, Level::Debug);
        assert_eq!(clone.level(), Level::Error);

        clone.info(&(), format_args!("dropped"));
        assert!(sink.is_empty());
        assert_eq!(clone, logger);
    }

    #[test]
    fn test_try_log_reports_emission() {
        let (logger, _) = memory_logger(Level::Info);
        assert!(!logger.try_log(Level::Debug, &(), format_args!("x")).unwrap());
        assert!(logger.try_log(Level::Info, &(), format_args!("x")).unwrap());
    }

    #[test]
    fn test_try_log_returns_serialization_error() {
        let (logger, sink) = memory_logger(Level::Debug);
        let mut ctx = HashMap::new();
        ctx.insert((1, 2), "tuple keys are not JSON");

        let result = logger.try_log(Level::Error, &ctx, format_args!("bad"));
        assert!(matches!(result, Err(ContextError::Serialize(_))));
        assert!(sink.is_empty());
    }

    #[test]
    #[should_panic(expected = "logger 'test'")]
    fn test_unserializable_context_panics() {
        let (logger, _) = memory_logger(Level::Debug);
        let mut ctx = HashMap::new();
        ctx.insert((1, 2), "tuple keys are not JSON");
        logger.error(&ctx, format_args!("bad"));
    }

    #[test]
    fn test_non_finite_context_is_an_error() {
        let (logger, sink) = memory_logger(Level::Debug);
        let mut ctx = HashMap::new();
        ctx.insert("ratio", f64::NAN);
        ctx.insert("inf", f64::INFINITY);

        let result = logger.try_log(Level::Error, &ctx, format_args!("x"));
        assert!(matches!(result, Err(ContextError::Serialize(_))));

        let ctx = crate::ctx! { "ratio" => f64::NAN };
        let result = logger.try_log(Level::Error, &ctx, format_args!("y"));
        assert!(matches!(result, Err(ContextError::Serialize(_))));
        assert!(sink.is_empty());
    }

    #[test]
    #[should_panic(expected = "logger 'test'")]
    fn test_nan_in_ctx_macro_panics() {
        let (logger, _) = memory_logger(Level::Debug);
        logger.error(&crate::ctx! { "ratio" => f64::NAN }, format_args!("y"));
    }

    #[test]
    fn test_failed_write_is_counted_apart() {
        let recorder = CounterRecorder::default();
        let broken = Logger::with_sink(LoggerConfig::new("broken"), Arc::new(BrokenSink));
        let (working, sink) = memory_logger(Level::Debug);

        ::metrics::with_local_recorder(&recorder, || {
            assert!(broken.try_log(Level::Error, &(), format_args!("lost")).unwrap());
            broken.info(&(), format_args!("lost too"));
            working.info(&(), format_args!("kept"));
        });

        assert_eq!(sink.len(), 1);
        assert_eq!(recorder.value("ctxlog_write_failures_total"), 2);
        assert_eq!(recorder.value("ctxlog_lines_total"), 1);
    }

    #[test]
    fn test_disabled_call_ignores_bad_context() {
        let (logger, sink) = memory_logger(Level::Error);
        let mut ctx = HashMap::new();
        ctx.insert((1, 2), "never encoded");
        logger.debug(&ctx, format_args!("suppressed"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_include_name_and_color_reach_the_sink() {
        let sink = Arc::new(MemorySink::new());
        let config = LoggerConfig {
            name: "db".into(),
            level: None,
            color: true,
            include_name: true,
        };
        let logger = Logger::with_sink(config, sink.clone());
        logger.critical(&(), format_args!("down"));
        assert!(sink.lines()[0].ends_with("| CRITICAL | down | db"));
    }
}
