use std::time::Duration;

use thiserror::Error;

/// Error for QualifiedName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QualifiedNameError {
    #[error("Authenticator name must not be blank")]
    Blank,

    #[error("Authenticator name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Authenticator name contains control characters")]
    ControlCharacters,
}

/// Error produced while turning persisted configuration into authenticators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoaderError {
    #[error("Failed to read authenticators configuration: {0}")]
    Configuration(String),

    #[error("Unknown authenticator kind '{kind}' for {name}")]
    UnknownKind { name: String, kind: String },

    #[error("Missing setting '{setting}' for authenticator {name}")]
    MissingSetting { name: String, setting: String },

    #[error("Invalid authenticator name: {0}")]
    InvalidName(#[from] QualifiedNameError),

    #[error("Configuration declares no enabled authenticators")]
    Empty,
}

/// Top-level error for all registry operations.
///
/// Every variant leaves the registry exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    // Caller supplied a position outside the chain
    #[error("Index out of range: {index} (registry holds {length} authenticators)")]
    IndexOutOfRange { index: i64, length: usize },

    // Configuration produced nothing installable
    #[error("Invalid reload: {0}")]
    InvalidReload(String),

    // Transient, safe to retry
    #[error("Timed out after {0:?} waiting for the registry lock")]
    LockContentionTimeout(Duration),

    #[error("Authenticator registry is not initialized")]
    NotInitialized,
}

impl From<LoaderError> for RegistryError {
    fn from(err: LoaderError) -> Self {
        RegistryError::InvalidReload(err.to_string())
    }
}
