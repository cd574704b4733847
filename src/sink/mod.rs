//! Rendering and output of log lines.
//!
//! # Data Flow
//! ```text
//! Logger (level check passed, message built)
//!     → Record { name, level, timestamp, message, hints }
//!     → Sink::render (timestamp/level/message layout)
//!     → Sink::write (stream, memory, ...)
//! ```
//!
//! # Design Decisions
//! - The core never formats timestamps or writes bytes itself
//! - Sinks own the level ordering used for threshold checks
//! - Render hints (color, logger name) travel with each record

pub mod memory;
pub mod stream;

use std::cmp::Ordering;
use std::io;

use chrono::{DateTime, Local};

use crate::logger::Level;

pub use memory::{CapturedRecord, MemorySink};
pub use stream::StreamSink;

/// Separator between the fields of a rendered line.
pub const SEPARATOR: &str = " | ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One log event handed to a sink.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Name of the emitting logger.
    pub name: &'a str,
    pub level: Level,
    pub timestamp: DateTime<Local>,
    /// Final message, context suffix included.
    pub message: &'a str,
    /// Append the logger name to the rendered line.
    pub include_name: bool,
    /// Colorize the rendered line.
    pub color: bool,
}

/// Output backend for loggers.
pub trait Sink: Send + Sync {
    /// Compare two levels by verbosity.
    ///
    /// A call at `level` is emitted when `compare_levels(level, threshold)`
    /// is not [`Ordering::Greater`].
    fn compare_levels(&self, a: Level, b: Level) -> Ordering {
        a.cmp(&b)
    }

    /// Lay out a record as a single line, without trailing newline.
    fn render(&self, record: &Record<'_>) -> String;

    /// Write a rendered line.
    fn write(&self, line: &str) -> io::Result<()>;
}

/// Plain `timestamp | LEVEL | message[ | name]` layout shared by the bundled sinks.
pub fn render_plain(record: &Record<'_>) -> String {
    let mut line = format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}",
        record.timestamp.format(TIMESTAMP_FORMAT),
        record.level.label(),
        record.message,
    );
    if record.include_name {
        line.push_str(SEPARATOR);
        line.push_str(record.name);
    }
    line
}
