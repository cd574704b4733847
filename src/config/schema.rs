//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Level names stay strings here so validation can report every bad one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logger::{Level, LoggerConfig, ParseLevelError};

/// Root configuration.
///
/// ```toml
/// [defaults]
/// level = "info"
/// include_name = true
///
/// [loggers]
/// db = "warning"
/// http = "debug"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Template for every logger the registry creates.
    pub defaults: DefaultsConfig,

    /// Per-name level overrides.
    pub loggers: BTreeMap<String, String>,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl LoggingConfig {
    /// Default logger config for a registry.
    pub fn default_logger_config(&self) -> Result<LoggerConfig, ParseLevelError> {
        self.defaults.to_logger_config()
    }

    /// Parsed per-name levels.
    pub fn levels(&self) -> Result<Vec<(String, Level)>, ParseLevelError> {
        self.loggers
            .iter()
            .map(|(name, level)| Ok((name.clone(), level.parse::<Level>()?)))
            .collect()
    }
}

/// Default logger settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Level name; empty lets every level through.
    pub level: String,

    /// Colorize rendered lines.
    pub color: bool,

    /// Append the logger name to rendered lines.
    pub include_name: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            color: false,
            include_name: false,
        }
    }
}

impl DefaultsConfig {
    pub fn to_logger_config(&self) -> Result<LoggerConfig, ParseLevelError> {
        let level = if self.level.is_empty() {
            None
        } else {
            Some(self.level.parse()?)
        };
        Ok(LoggerConfig {
            name: String::new(),
            level,
            color: self.color,
            include_name: self.include_name,
        })
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `tracing` filter for ctxlog's own diagnostics, used when `RUST_LOG` is unset.
    pub tracing_filter: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            tracing_filter: "ctxlog=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
