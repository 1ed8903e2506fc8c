//! Error types for MySQL auth scrambles.
//!
//! The hash transforms themselves are total functions and never fail.
//! Errors only come from the edges: salt policy, byte/text marshaling,
//! greeting parsing and configuration.

use thiserror::Error;

/// The main error type for auth operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An argument violates a configured precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Conversion between a raw byte buffer and another representation
    /// would lose or corrupt bytes.
    #[error("Marshaling error: {0}")]
    Marshaling(String),

    /// Auth plugin name not supported.
    #[error("Unsupported auth plugin: '{0}'. Expected: mysql_native_password or caching_sha2_password")]
    UnsupportedPlugin(String),

    /// Malformed server greeting.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Salt length does not match what the strict policy requires.
    pub fn salt_length(expected: usize, actual: usize) -> Self {
        Self::InvalidArgument(format!(
            "salt must be {} bytes, got {}",
            expected, actual
        ))
    }

    /// Greeting ended before `field` could be read.
    pub fn truncated(field: &'static str) -> Self {
        Self::Protocol(format!("server greeting truncated at {}", field))
    }
}

/// Result type alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
