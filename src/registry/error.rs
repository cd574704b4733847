//! Registry error definitions.

use thiserror::Error;

use crate::logger::ParseLevelError;

/// Errors returned by [`LoggerRegistry`](crate::LoggerRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A logger with this name is already registered.
    #[error("a logger named '{0}' already exists")]
    DuplicateName(String),

    /// No logger with this name is registered.
    #[error("logger '{0}' not found")]
    NotFound(String),

    /// The requested level is not one of the recognized names.
    #[error(transparent)]
    InvalidLevel(#[from] ParseLevelError),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }

    pub fn is_invalid_level(&self) -> bool {
        matches!(self, RegistryError::InvalidLevel(_))
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
