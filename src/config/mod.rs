//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggingConfig (validated)
//!     → defaults become the registry's default LoggerConfig
//!     → apply.rs sets per-name levels on registered loggers
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → apply.rs re-applies per-name levels
//! ```
//!
//! # Design Decisions
//! - Only per-name levels are hot-reloaded; defaults apply at registry creation
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod apply;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use apply::{apply_levels, ApplyReport};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AdminConfig, DefaultsConfig, LoggingConfig, ObservabilityConfig};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
