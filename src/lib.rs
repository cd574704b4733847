//! Structured, leveled logging with a name-based registry.
//!
//! Components obtain named [`Logger`]s from a [`LoggerRegistry`], attach a
//! structured [`Ctx`] to individual calls, and have their verbosity changed
//! at runtime by name.
//!
//! ```
//! use std::sync::Arc;
//! use ctxlog::{ctx, Level, LoggerConfig, LoggerOptions, LoggerRegistry, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let registry = LoggerRegistry::with_sink(LoggerConfig::default().with_level(Level::Info), sink.clone());
//!
//! let db = registry.must_create("db", LoggerOptions::default());
//! db.info(&ctx!(), format_args!("ready"));
//!
//! registry.set_level("db", "warning").unwrap();
//! db.info(&ctx!(), format_args!("ready"));
//! db.error(&ctx! { "code" => 500 }, format_args!("fail"));
//!
//! assert_eq!(sink.len(), 2);
//! ```

pub mod macros;

pub mod admin;
pub mod config;
pub mod logger;
pub mod observability;
pub mod registry;
pub mod sink;

pub use logger::{Context, ContextError, Ctx, Level, Logger, LoggerConfig, LoggerOptions, ParseLevelError};
pub use registry::{LoggerRegistry, RegistryError, RegistryResult};
pub use sink::{MemorySink, Record, Sink, StreamSink};
