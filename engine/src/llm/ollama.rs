//! Ollama Text Generator
//!
//! This module implements the TextGenerator trait for Ollama, a local model server.
//! Ollama runs models locally on the user's machine, typically at http://localhost:11434.
//!
//! Key features:
//! - Local execution (no API keys required)
//! - Single-shot completion through `/api/generate`
//! - Output bound passed as `options.num_predict`
//! - Health check through `/api/tags`

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{map_transport_error, GenerationError, Result, TextGenerator};
use crate::config::OllamaConfig;

/// Ollama provider configuration
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    /// Base URL for Ollama API (typically http://localhost:11434)
    base_url: String,

    /// Model name to use (e.g., "llama3.1:8b")
    model: String,

    /// HTTP client for API requests
    client: Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the default 300s timeout
    ///
    /// # Arguments
    /// * `base_url` - Base URL for Ollama API (e.g., "http://localhost:11434")
    /// * `model` - Model name to use (e.g., "llama3.1:8b")
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(base_url, model, Duration::from_secs(300))
    }

    /// Create a new Ollama provider with an explicit request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create a provider from the `[llm.ollama]` config section
    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::with_timeout(
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Model this provider talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str, max_tokens: usize) -> OllamaRequest {
        OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                num_predict: max_tokens,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn is_local(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String> {
        tracing::debug!(
            "Ollama request: model={}, prompt_chars={}, max_tokens={}",
            self.model,
            prompt.len(),
            max_tokens
        );

        let request = self.build_request(prompt, max_tokens);

        let url = format!("{}/api/generate", self.base_url);
        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(e, "Ollama", &self.base_url))?;

        tracing::info!(
            "Ollama response received in {:.1}s",
            start.elapsed().as_secs_f64()
        );

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(if status.is_client_error() {
                GenerationError::InvalidRequest(format!(
                    "Ollama API error ({}): {}",
                    status, error_text
                ))
            } else {
                GenerationError::ProviderUnavailable(format!(
                    "Ollama API error ({}): {}",
                    status, error_text
                ))
            });
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            GenerationError::ParseError(format!("Failed to parse Ollama response: {}", e))
        })?;

        Ok(ollama_response.response)
    }

    async fn check_health(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Ollama health check failed: {}", e);
                false
            }
        }
    }
}

/// Ollama generate request format
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

/// Sampling options; only the output bound is set
#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: usize,
}

/// Ollama generate response format
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[allow(dead_code)]
    #[serde(default)]
    done: bool,
}
