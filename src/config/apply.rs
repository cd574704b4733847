//! Applying per-name levels from a config to a live registry.

use crate::config::schema::LoggingConfig;
use crate::registry::LoggerRegistry;

/// Outcome of [`apply_levels`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Loggers whose level was set.
    pub updated: Vec<String>,
    /// Configured names with no registered logger.
    pub unknown: Vec<String>,
    /// Names whose configured level was rejected, with the reason.
    pub rejected: Vec<(String, String)>,
}

/// Set the level of every registered logger named in `config.loggers`.
///
/// Names that are not registered are reported, never created: loggers are
/// owned by the components that register them.
pub fn apply_levels(registry: &LoggerRegistry, config: &LoggingConfig) -> ApplyReport {
    let mut report = ApplyReport::default();

    for (name, level) in &config.loggers {
        match registry.set_level(name, level) {
            Ok(()) => report.updated.push(name.clone()),
            Err(e) if e.is_not_found() => {
                tracing::warn!(logger = %name, "Configured logger is not registered");
                report.unknown.push(name.clone());
            }
            Err(e) => {
                tracing::error!(logger = %name, error = %e, "Rejected configured level");
                report.rejected.push((name.clone(), e.to_string()));
            }
        }
    }

    report
}
