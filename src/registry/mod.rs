//! Name-based logger registry.
//!
//! # Responsibilities
//! - Create loggers from a default config, at most one per name
//! - Look up loggers and their levels by name
//! - Change a logger's level at runtime, visible to every existing handle
//!
//! # Design Decisions
//! - One coarse mutex guards the name map; registry calls are rare next to log calls
//! - Log calls never take the registry lock, they read the logger's own config cell
//! - Tracing events and metrics are emitted after the lock is released
//! - The registry is an explicit value shared through `Arc`, not a global

pub mod error;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::logger::{Level, Logger, LoggerConfig, LoggerOptions};
use crate::observability::metrics;
use crate::sink::{Sink, StreamSink};

pub use error::{RegistryError, RegistryResult};

/// Registry of named loggers sharing one sink and one default config.
pub struct LoggerRegistry {
    default_config: LoggerConfig,
    sink: Arc<dyn Sink>,
    loggers: Mutex<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    /// Create a registry whose loggers write to stderr.
    pub fn new(default_config: LoggerConfig) -> Self {
        Self::with_sink(default_config, Arc::new(StreamSink::stderr()))
    }

    pub fn with_sink(default_config: LoggerConfig, sink: Arc<dyn Sink>) -> Self {
        Self {
            default_config,
            sink,
            loggers: Mutex::new(HashMap::new()),
        }
    }

    pub fn default_config(&self) -> &LoggerConfig {
        &self.default_config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Logger>> {
        self.loggers.lock().expect("logger registry mutex poisoned")
    }

    /// Create and register a logger named `name`.
    ///
    /// Fails with [`RegistryError::DuplicateName`] if the name is taken; the
    /// registered logger is left untouched.
    pub fn create(&self, name: &str, options: LoggerOptions) -> RegistryResult<Logger> {
        let mut loggers = self.lock();
        if loggers.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        let config = options.resolve(name, &self.default_config);
        let threshold = config.threshold();
        let logger = Logger::with_sink(config, self.sink.clone());
        loggers.insert(name.to_string(), logger.clone());
        let count = loggers.len();
        drop(loggers);

        metrics::record_registered(count);
        tracing::debug!(logger = %name, level = %threshold, "Logger registered");
        Ok(logger)
    }

    /// Like [`create`](Self::create), for names registered once at startup.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered.
    pub fn must_create(&self, name: &str, options: LoggerOptions) -> Logger {
        // The lock is released before panicking so the registry stays usable.
        match self.create(name, options) {
            Ok(logger) => logger,
            Err(e) => panic!("{}", e),
        }
    }

    /// The logger registered under `name`.
    pub fn get(&self, name: &str) -> RegistryResult<Logger> {
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Names of all registered loggers, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and current level of every registered logger, sorted by name.
    pub fn levels(&self) -> Vec<(String, Level)> {
        let mut levels: Vec<(String, Level)> = self
            .lock()
            .iter()
            .map(|(name, logger)| (name.clone(), logger.level()))
            .collect();
        levels.sort_by(|a, b| a.0.cmp(&b.0));
        levels
    }

    /// Current level of the logger registered under `name`.
    pub fn level(&self, name: &str) -> RegistryResult<Level> {
        self.lock()
            .get(name)
            .map(Logger::level)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Change the level of the logger registered under `name`.
    ///
    /// `level` is validated after the lookup; on any error the logger keeps
    /// its current level.
    pub fn set_level(&self, name: &str, level: &str) -> RegistryResult<()> {
        let loggers = self.lock();
        let logger = loggers
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        let level: Level = level.parse()?;

        let previous = logger.set_level(level);
        drop(loggers);

        metrics::record_level_change();
        tracing::info!(logger = %name, from = %previous, to = %level, "Log level changed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("default_config", &self.default_config)
            .field("loggers", &self.list())
            .finish_non_exhaustive()
    }
}
