//! Agent Core
//!
//! One conversational turn is two sequential model calls:
//!
//! 1. The planner labels the user's intent
//! 2. The response generator answers using recent memory, then records the turn
//!
//! A failure in either call abandons the turn; memory only changes when the
//! reply was produced.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::conductor::memory::MemoryBuffer;
use crate::conductor::planner::Planner;
use crate::conductor::responder::{ResponseGenerator, DEFAULT_MAX_TOKENS};
use crate::config::Config;
use crate::llm::TextGenerator;
use sdk::errors::EngineError;
use sdk::types::Intent;

/// Result of one processed turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// Planner label, verbatim
    pub action: String,

    /// Label classified into a known intent, if it is one
    pub intent: Option<Intent>,

    /// Assistant reply
    pub reply: String,

    /// Wall time for both model calls in milliseconds
    pub duration_ms: u64,
}

/// Single-session assistant: planner, response generator and their memory
pub struct Assistant {
    planner: Planner,
    responder: ResponseGenerator,
    max_tokens: usize,
}

impl Assistant {
    /// Assemble an assistant from already-built parts.
    pub fn new(planner: Planner, responder: ResponseGenerator) -> Self {
        Self {
            planner,
            responder,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Build an assistant from configuration, sharing one backend between
    /// planner and response generator.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` for a zero capacity or token bound.
    pub fn from_config(config: &Config, llm: Arc<dyn TextGenerator>) -> Result<Self, EngineError> {
        let memory = MemoryBuffer::new(config.memory.max_memory)?;
        let planner = Planner::new(Arc::clone(&llm)).with_max_tokens(config.llm.planner_max_tokens)?;
        let responder =
            ResponseGenerator::new(llm, memory).with_context_turns(config.memory.context_turns);

        Self::new(planner, responder).with_max_tokens(config.llm.max_tokens)
    }

    /// Override the reply output bound.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Result<Self, EngineError> {
        if max_tokens == 0 {
            return Err(EngineError::Config(
                "max_tokens must be at least 1".to_string(),
            ));
        }
        self.max_tokens = max_tokens;
        Ok(self)
    }

    /// Plan and answer one user message.
    pub async fn handle_turn(&mut self, user_text: &str) -> Result<TurnOutcome, EngineError> {
        let start = Instant::now();

        let action = self.planner.decide_next_action(user_text).await?;
        let intent = Intent::from_label(&action);
        match intent {
            Some(intent) => info!("Planner chose intent: {}", intent),
            None => warn!("Planner returned unrecognised label: {:?}", action),
        }

        let reply = self.responder.generate(user_text, self.max_tokens).await?;

        Ok(TurnOutcome {
            action,
            intent,
            reply,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Only ask the planner; memory is not touched.
    pub async fn plan(&self, user_text: &str) -> Result<String, EngineError> {
        self.planner.decide_next_action(user_text).await
    }

    /// Conversation memory
    pub fn memory(&self) -> &MemoryBuffer {
        self.responder.memory()
    }

    /// Forget the conversation so far.
    pub fn clear_memory(&mut self) {
        self.responder.memory_mut().clear();
        info!("Conversation memory cleared");
    }

    /// Transcript of the turns that the next prompt will include
    pub fn context(&self) -> String {
        self.responder
            .memory()
            .render_context(self.responder.context_turns())
    }

    /// Reply output bound
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockGenerator;
    use crate::llm::GenerationError;

    fn assistant(mock: &Arc<MockGenerator>) -> Assistant {
        let llm: Arc<dyn TextGenerator> = mock.clone();
        Assistant::from_config(&Config::default(), llm).unwrap()
    }

    #[tokio::test]
    async fn test_turn_runs_planner_then_responder() {
        let mock = Arc::new(MockGenerator::scripted(["Chat", " Hello! "]));
        let mut assistant = assistant(&mock);

        let outcome = assistant.handle_turn("Hi").await.unwrap();
        assert_eq!(outcome.action, "chat");
        assert_eq!(outcome.intent, Some(Intent::Chat));
        assert_eq!(outcome.reply, "Hello!");

        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].starts_with("You are a planning assistant."));
        assert!(prompts[1].starts_with("Conversation so far:"));
        assert_eq!(assistant.memory().len(), 1);
    }

    #[tokio::test]
    async fn test_planning_prompt_is_not_recorded() {
        let mock = Arc::new(MockGenerator::scripted(["task", "Done."]));
        let mut assistant = assistant(&mock);

        assistant.handle_turn("Add milk to my list").await.unwrap();
        assert_eq!(
            assistant.context(),
            "User: Add milk to my list\nAI: Done."
        );
    }

    #[tokio::test]
    async fn test_unrecognised_label_is_kept() {
        let mock = Arc::new(MockGenerator::scripted(["Weather", "Sunny."]));
        let mut assistant = assistant(&mock);

        let outcome = assistant.handle_turn("Is it sunny?").await.unwrap();
        assert_eq!(outcome.action, "weather");
        assert_eq!(outcome.intent, None);
    }

    #[tokio::test]
    async fn test_planner_failure_aborts_turn() {
        let mock = Arc::new(MockGenerator::always("unused"));
        mock.push_error(GenerationError::Timeout);
        let mut assistant = assistant(&mock);

        assert!(assistant.handle_turn("Hi").await.is_err());
        assert!(assistant.memory().is_empty());
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_memory() {
        let mock = Arc::new(MockGenerator::always("chat"));
        let mut assistant = assistant(&mock);
        assistant.handle_turn("Hi").await.unwrap();

        assistant.clear_memory();
        assert!(assistant.memory().is_empty());
        assert_eq!(assistant.context(), "");
    }

    #[tokio::test]
    async fn test_plan_leaves_memory_alone() {
        let mock = Arc::new(MockGenerator::always("report"));
        let assistant = assistant(&mock);

        assert_eq!(assistant.plan("Summarise Q3").await.unwrap(), "report");
        assert!(assistant.memory().is_empty());
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = Config::default();
        config.memory.max_memory = 0;
        let llm: Arc<dyn TextGenerator> = Arc::new(MockGenerator::new());
        assert!(matches!(
            Assistant::from_config(&config, llm),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_token_bounds_from_config() {
        let mut config = Config::default();
        config.llm.max_tokens = 64;
        let llm: Arc<dyn TextGenerator> = Arc::new(MockGenerator::new());
        let assistant = Assistant::from_config(&config, llm).unwrap();
        assert_eq!(assistant.max_tokens(), 64);
    }
}
