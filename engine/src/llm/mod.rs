//! Text Generation Abstraction Layer
//!
//! This module provides a common interface for turning a prompt into text.
//! The [`TextGenerator`] trait is the only thing the planner and the response
//! generator know about; concrete backends (Ollama, OpenAI-compatible servers,
//! the in-process mock) are chosen at startup from configuration and injected.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LLMConfig;

pub mod mock;
pub mod ollama;
pub mod openai;

pub use sdk::errors::GenerationError;

/// Result type for generation calls
pub type Result<T> = std::result::Result<T, GenerationError>;

/// A backend that completes a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the name of the backend (e.g., "ollama", "openai")
    fn name(&self) -> &str;

    /// Returns true if the backend runs on this machine
    fn is_local(&self) -> bool;

    /// Generate a completion for `prompt`, producing at most `max_tokens`
    /// output tokens.
    ///
    /// # Returns
    /// * `Ok(String)` - The raw generated text (callers trim it)
    /// * `Err(GenerationError)` - If the backend call fails
    async fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String>;

    /// Check if the backend is currently reachable.
    /// Default implementation returns true.
    async fn check_health(&self) -> bool {
        true
    }
}

/// Construct the backend selected by `config.provider`.
///
/// The provider name is validated when the configuration is loaded; an
/// unknown name here still surfaces as `InvalidRequest` rather than a panic.
pub fn build_generator(config: &LLMConfig) -> Result<Arc<dyn TextGenerator>> {
    match config.provider.as_str() {
        "ollama" => Ok(Arc::new(ollama::OllamaProvider::from_config(&config.ollama))),
        "openai" => Ok(Arc::new(openai::OpenAIProvider::from_config(&config.openai))),
        other => Err(GenerationError::InvalidRequest(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}

/// Map a transport failure onto the generation error taxonomy.
pub(crate) fn map_transport_error(e: reqwest::Error, backend: &str, base_url: &str) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::ProviderUnavailable(format!(
            "Cannot connect to {} at {}. Is it running?",
            backend, base_url
        ))
    } else {
        GenerationError::NetworkError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_generator() {
        let generator = build_generator(&LLMConfig::default()).unwrap();
        assert_eq!(generator.name(), "ollama");
        assert!(generator.is_local());
    }

    #[test]
    fn test_build_openai_generator() {
        let config = LLMConfig {
            provider: "openai".to_string(),
            ..LLMConfig::default()
        };
        let generator = build_generator(&config).unwrap();
        assert_eq!(generator.name(), "openai");
        assert!(!generator.is_local());
    }

    #[test]
    fn test_build_unknown_generator() {
        let config = LLMConfig {
            provider: "flan-t5".to_string(),
            ..LLMConfig::default()
        };
        let err = build_generator(&config).err().unwrap();
        assert!(matches!(err, GenerationError::InvalidRequest(_)));
    }
}
