//! Mock text generator for tests and offline demos.
//!
//! Replies are scripted in order; once the script runs out the fallback reply
//! (if any) is returned for every further call. Every prompt and token bound
//! the mock receives is recorded so callers can assert on exactly what was sent.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{GenerationError, Result, TextGenerator};

/// A single recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub max_tokens: usize,
}

/// Scripted in-process generator.
#[derive(Debug, Default)]
pub struct MockGenerator {
    script: Mutex<VecDeque<Result<String>>>,
    fallback: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGenerator {
    /// Build a mock with no script and no fallback; every call fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mock that returns `reply` for every call.
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Build a mock that returns `replies` in order, then fails.
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::default();
        for reply in replies {
            mock.push_reply(reply);
        }
        mock
    }

    /// Set the reply used once the script is exhausted (builder).
    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.lock_script().push_back(Ok(reply.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: GenerationError) {
        self.lock_script().push_back(Err(error));
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.prompt).collect()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String>>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_local(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                prompt: prompt.to_string(),
                max_tokens,
            });

        match self.lock_script().pop_front() {
            Some(next) => next,
            None => self.fallback.clone().ok_or_else(|| {
                GenerationError::ProviderUnavailable("mock script exhausted".to_string())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mock = MockGenerator::scripted(["one", "two"]);
        assert_eq!(mock.generate("a", 10).await.unwrap(), "one");
        assert_eq!(mock.generate("b", 20).await.unwrap(), "two");
        assert!(matches!(
            mock.generate("c", 30).await,
            Err(GenerationError::ProviderUnavailable(_))
        ));

        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].prompt, "b");
        assert_eq!(calls[1].max_tokens, 20);
    }

    #[tokio::test]
    async fn test_fallback_after_script() {
        let mock = MockGenerator::scripted(["first"]).with_fallback("again");
        assert_eq!(mock.generate("x", 1).await.unwrap(), "first");
        assert_eq!(mock.generate("y", 1).await.unwrap(), "again");
        assert_eq!(mock.generate("z", 1).await.unwrap(), "again");
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockGenerator::always("ok");
        mock.push_error(GenerationError::Timeout);
        assert!(matches!(
            mock.generate("x", 1).await,
            Err(GenerationError::Timeout)
        ));
        assert_eq!(mock.generate("y", 1).await.unwrap(), "ok");
        assert_eq!(mock.prompts(), vec!["x".to_string(), "y".to_string()]);
    }
}
