//! Application error types
//!
//! Wraps the errors of every layer so callers can decide, per error, whether
//! to skip a record, refetch it, or give up.

use chat_core::MarshalError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Payload errors
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get error code for logs and callers
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Marshal(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if the received payload itself was at fault.
    ///
    /// Such records can be skipped; refetching returns the same bytes.
    #[must_use]
    pub fn is_payload_error(&self) -> bool {
        match self {
            Self::Marshal(e) => e.is_payload_error(),
            Self::Config(_) => false,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
