//! Sink writing rendered lines to a byte stream (stderr by default).

use std::io::{self, Write};
use std::sync::Mutex;

use crate::logger::Level;
use crate::sink::{render_plain, Record, Sink};

const RESET: &str = "\x1b[0m";

fn color_code(level: Level) -> &'static str {
    match level {
        Level::Critical => "\x1b[35m",
        Level::Error => "\x1b[31m",
        Level::Warning => "\x1b[33m",
        Level::Notice => "\x1b[32m",
        Level::Info => "\x1b[37m",
        Level::Debug => "\x1b[36m",
    }
}

/// Writes one line per record to the wrapped writer.
pub struct StreamSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Sink writing to the process' standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl std::fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSink").finish_non_exhaustive()
    }
}

impl Sink for StreamSink {
    fn render(&self, record: &Record<'_>) -> String {
        let line = render_plain(record);
        if record.color {
            format!("{}{}{}", color_code(record.level), line, RESET)
        } else {
            line
        }
    }

    fn write(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().expect("stream sink mutex poisoned");
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::sync::Arc;

    /// Writer handle the test can read back after the sink took ownership.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record(color: bool) -> Record<'static> {
        Record {
            name: "http",
            level: Level::Error,
            timestamp: Local::now(),
            message: "upstream closed",
            include_name: true,
            color,
        }
    }

    #[test]
    fn test_color_wraps_line() {
        let sink = StreamSink::new(io::sink());
        let line = sink.render(&record(true));
        assert!(line.starts_with("\x1b[31m"));
        assert!(line.ends_with("upstream closed | http\x1b[0m"));
    }

    #[test]
    fn test_no_color_by_default() {
        let sink = StreamSink::new(io::sink());
        let line = sink.render(&record(false));
        assert!(!line.contains('\x1b'));
        assert!(line.contains(" | ERROR | upstream closed | http"));
    }

    #[test]
    fn test_write_appends_newline() {
        let buf = SharedBuf::default();
        let sink = StreamSink::new(buf.clone());
        sink.write("first").unwrap();
        sink.write("second").unwrap();
        assert_eq!(buf.contents(), "first\nsecond\n");
    }
}
