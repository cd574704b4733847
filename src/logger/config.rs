//! Logger configuration.

use serde::{Deserialize, Serialize};

use crate::logger::Level;

/// Settings a [`Logger`](crate::Logger) is built from.
///
/// Only `level` changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Unique logger name.
    pub name: String,

    /// Threshold; `None` inherits the default, which lets every level through.
    pub level: Option<Level>,

    /// Colorize rendered lines.
    pub color: bool,

    /// Append the logger name to rendered lines.
    pub include_name: bool,
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Least severe level this config lets through.
    pub fn threshold(&self) -> Level {
        self.level.unwrap_or(Level::Debug)
    }
}

/// Per-logger overrides applied on top of a registry's default config.
///
/// Every field left at `None` keeps the registry default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggerOptions {
    pub level: Option<Level>,
    pub color: Option<bool>,
    pub include_name: Option<bool>,
}

impl LoggerOptions {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_include_name(mut self, include_name: bool) -> Self {
        self.include_name = Some(include_name);
        self
    }

    /// Build the config for `name` from `defaults` and these overrides.
    pub fn resolve(&self, name: &str, defaults: &LoggerConfig) -> LoggerConfig {
        LoggerConfig {
            name: name.to_string(),
            level: self.level.or(defaults.level),
            color: self.color.unwrap_or(defaults.color),
            include_name: self.include_name.unwrap_or(defaults.include_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults_to_debug() {
        assert_eq!(LoggerConfig::new("a").threshold(), Level::Debug);
        assert_eq!(LoggerConfig::new("a").with_level(Level::Error).threshold(), Level::Error);
    }

    #[test]
    fn test_options_override_defaults() {
        let defaults = LoggerConfig {
            name: String::new(),
            level: Some(Level::Info),
            color: true,
            include_name: false,
        };

        let plain = LoggerOptions::default().resolve("db", &defaults);
        assert_eq!(plain.name, "db");
        assert_eq!(plain.level, Some(Level::Info));
        assert!(plain.color);

        let custom = LoggerOptions::default()
            .with_level(Level::Debug)
            .with_include_name(true)
            .resolve("db", &defaults);
        assert_eq!(custom.level, Some(Level::Debug));
        assert!(custom.include_name);
        assert!(custom.color);
    }
}
