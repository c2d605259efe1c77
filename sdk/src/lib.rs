//! Parley SDK
//!
//! Shared types and error definitions used by the Parley engine and its tests.

/// Error types and handling
pub mod errors;

/// Conversation types (turns, intents)
pub mod types;

// Re-export commonly used types
pub use errors::{EngineError, ErrorHintExt, GenerationError};
pub use types::{Intent, Turn};
