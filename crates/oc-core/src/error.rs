//! Error types for oxidized-ra

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Hash database error: {0}")]
    Database(String),
}

/// Errors reported by the hash resolution service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with an error. The message may be empty.
    #[error("{0}")]
    Server(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Message suitable for showing to the user, if the failure carried one
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Server(message) if message.is_empty() => None,
            Self::Server(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
