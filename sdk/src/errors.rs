//! Error types and handling
//!
//! This module provides the error types used throughout the Parley engine.
//! Errors fall into two families:
//!
//! - **Configuration**: invalid capacity, invalid generation parameters or an
//!   unreadable config file. Surfaced immediately, never recovered.
//! - **Generation**: the text generation backend failed. Not retried; the
//!   current turn is abandoned but the session keeps running.
//!
//! All errors implement [`ErrorHintExt`], which provides a short user-facing
//! hint and tells the caller whether the session can continue.

use thiserror::Error;

/// Trait for Parley error extensions
pub trait ErrorHintExt {
    /// Returns a user-friendly hint for the error
    ///
    /// The hint is safe to print in the REPL and does not contain secrets
    /// such as API keys.
    fn user_hint(&self) -> &str;

    /// Returns whether the session can continue after this error
    fn is_recoverable(&self) -> bool;
}

/// Failures reported by a text generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Main engine error type
///
/// # Examples
///
/// ```
/// use sdk::errors::{EngineError, ErrorHintExt, GenerationError};
///
/// let error = EngineError::from(GenerationError::Timeout);
/// println!("Hint: {}", error.user_hint());
/// assert!(error.is_recoverable());
///
/// let fatal = EngineError::Config("max_memory must be at least 1".to_string());
/// assert!(!fatal.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Text generation errors
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    // Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorHintExt for GenerationError {
    fn user_hint(&self) -> &str {
        match self {
            Self::ProviderUnavailable(_) => {
                "Model backend unavailable. Check that it is running and reachable"
            }
            Self::AuthenticationFailed(_) => "Authentication failed. Check your API key",
            Self::RateLimitExceeded => "Rate limit exceeded. Please wait before trying again",
            Self::InvalidRequest(_) => "The model backend rejected the request",
            Self::NetworkError(_) => "Network operation failed. Check your connection",
            Self::Timeout => "Model backend took too long to respond. Try again",
            Self::ParseError(_) => "Model backend returned an unexpected response",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

impl ErrorHintExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Config(_) => "Check your config.toml file for errors",
            Self::Generation(inner) => inner.user_hint(),
            Self::Io(_) => "File system operation failed",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Generation(inner) => inner.is_recoverable(),
            Self::Io(_) => true,
        }
    }
}
