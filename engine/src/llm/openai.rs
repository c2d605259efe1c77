//! OpenAI-compatible Text Generator
//!
//! Talks to any server exposing `/chat/completions` (OpenAI, vLLM, llama.cpp
//! server, LM Studio). The prompt is sent as a single user message.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use super::{map_transport_error, GenerationError, Result, TextGenerator};
use crate::config::OpenAIConfig;

pub struct OpenAIProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create a provider from the `[llm.openai]` config section, reading the
    /// key from the configured environment variable.
    pub fn from_config(config: &OpenAIConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!(
                "Environment variable {} is not set; requests will be sent without a key",
                config.api_key_env
            );
        }
        Self::new(
            &config.base_url,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl TextGenerator for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn is_local(&self) -> bool {
        false
    }

    async fn check_health(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": max_tokens,
        });

        tracing::debug!(
            "OpenAI request: model={}, prompt_chars={}, max_tokens={}",
            self.model,
            prompt.len(),
            max_tokens
        );

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let start = std::time::Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(e, "OpenAI-compatible server", &self.base_url))?;

        tracing::info!(
            "OpenAI response received in {:.1}s",
            start.elapsed().as_secs_f64()
        );

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(GenerationError::AuthenticationFailed(text));
            } else if status.as_u16() == 429 {
                return Err(GenerationError::RateLimitExceeded);
            } else if status.is_server_error() {
                return Err(GenerationError::ProviderUnavailable(format!(
                    "OpenAI API error ({}): {}",
                    status, text
                )));
            } else {
                return Err(GenerationError::InvalidRequest(text));
            }
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationError::ParseError(e.to_string()))?;

        extract_content(&data)
    }
}

/// Pull `choices[0].message.content` out of a chat completion body.
fn extract_content(data: &serde_json::Value) -> Result<String> {
    let choice = data
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| GenerationError::ParseError("No choices in response".to_string()))?;

    let message = choice
        .get("message")
        .ok_or_else(|| GenerationError::ParseError("No message in choice".to_string()))?;

    message
        .get("content")
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| GenerationError::ParseError("Empty content".to_string()))
}
