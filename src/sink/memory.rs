//! In-memory sink capturing everything it is given.
//!
//! Used by tests to assert on emitted lines without touching a stream.

use std::io;
use std::sync::Mutex;

use crate::logger::Level;
use crate::sink::{render_plain, Record, Sink};

/// The parts of a record worth asserting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub name: String,
    pub level: Level,
    pub message: String,
}

#[derive(Debug, Default)]
struct Captured {
    records: Vec<CapturedRecord>,
    lines: Vec<String>,
}

/// Sink keeping rendered lines and records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    captured: Mutex<Captured>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records rendered so far, oldest first.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.captured.lock().expect("memory sink mutex poisoned").records.clone()
    }

    /// Lines written so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.captured.lock().expect("memory sink mutex poisoned").lines.clone()
    }

    pub fn len(&self) -> usize {
        self.captured.lock().expect("memory sink mutex poisoned").lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut captured = self.captured.lock().expect("memory sink mutex poisoned");
        captured.records.clear();
        captured.lines.clear();
    }
}

impl Sink for MemorySink {
    fn render(&self, record: &Record<'_>) -> String {
        self.captured
            .lock()
            .expect("memory sink mutex poisoned")
            .records
            .push(CapturedRecord {
                name: record.name.to_string(),
                level: record.level,
                message: record.message.to_string(),
            });
        render_plain(record)
    }

    fn write(&self, line: &str) -> io::Result<()> {
        self.captured
            .lock()
            .expect("memory sink mutex poisoned")
            .lines
            .push(line.to_string());
        Ok(())
    }
}
