//! Contextual, leveled loggers.
//!
//! # Data Flow
//! ```text
//! caller: logger.info(&ctx, format_args!(..))
//!     → level check against the current threshold (sink ordering)
//!     → disabled: return, nothing formatted
//!     → enabled: format message, append encoded context if non-empty
//!     → Sink::render → Sink::write
//! ```
//!
//! # Design Decisions
//! - Config lives in an `ArcSwap`; every handle reads it lock-free per call
//! - Level changes swap in a new config snapshot instead of replacing loggers
//! - An unserializable context is a programmer error and panics

pub mod config;
pub mod context;
pub mod handle;
pub mod level;

pub use config::{LoggerConfig, LoggerOptions};
pub use context::{Context, ContextError, Ctx};
pub use handle::Logger;
pub use level::{Level, ParseLevelError};
