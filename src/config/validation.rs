//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every level name against the recognized set
//! - Validate logger names and bind addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggingConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::LoggingConfig;
use crate::logger::Level;

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("defaults.level: invalid log level '{0}'")]
    InvalidDefaultLevel(String),

    #[error("loggers.{logger}: invalid log level '{level}'")]
    InvalidLoggerLevel { logger: String, level: String },

    #[error("loggers: logger names must not be empty or contain whitespace ('{0}')")]
    InvalidLoggerName(String),

    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("admin.api_key must not be empty when the admin API is enabled")]
    EmptyApiKey,
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &LoggingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let default_level = &config.defaults.level;
    if !default_level.is_empty() && default_level.parse::<Level>().is_err() {
        errors.push(ValidationError::InvalidDefaultLevel(default_level.clone()));
    }

    for (logger, level) in &config.loggers {
        if logger.is_empty() || logger.chars().any(char::is_whitespace) {
            errors.push(ValidationError::InvalidLoggerName(logger.clone()));
        }
        if level.parse::<Level>().is_err() {
            errors.push(ValidationError::InvalidLoggerLevel {
                logger: logger.clone(),
                level: level.clone(),
            });
        }
    }

    if config.admin.enabled {
        if config.admin.api_key.is_empty() {
            errors.push(ValidationError::EmptyApiKey);
        }
        if config.admin.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "admin.bind_address",
                value: config.admin.bind_address.clone(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LoggingConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_bad_level() {
        let mut config = LoggingConfig::default();
        config.defaults.level = "loud".into();
        config.loggers.insert("db".into(), "warning".into());
        config.loggers.insert("http".into(), "chatty".into());
        config.loggers.insert("cache".into(), "quiet".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::InvalidDefaultLevel("loud".into())));
        assert!(errors.contains(&ValidationError::InvalidLoggerLevel {
            logger: "http".into(),
            level: "chatty".into(),
        }));
    }

    #[test]
    fn test_rejects_bad_names() {
        let mut config = LoggingConfig::default();
        config.loggers.insert("has space".into(), "info".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidLoggerName("has space".into())]);
    }

    #[test]
    fn test_admin_checks_only_when_enabled() {
        let mut config = LoggingConfig::default();
        config.admin.api_key.clear();
        config.admin.bind_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.admin.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::EmptyApiKey));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::InvalidLoggerLevel {
            logger: "db".into(),
            level: "x".into(),
        };
        assert_eq!(err.to_string(), "loggers.db: invalid log level 'x'");
    }
}
