//! Conductor Planner
//!
//! Asks the model which agent should handle a user message. The answer is a
//! short free-text label; it is normalised (trimmed, lower-cased) but not
//! validated against the known intents. Use [`Intent::from_label`] to
//! classify it.
//!
//! [`Intent::from_label`]: sdk::types::Intent::from_label

use sdk::errors::EngineError;
use std::sync::Arc;

use crate::llm::TextGenerator;

/// Default output bound for a planning call
pub const DEFAULT_PLANNER_MAX_TOKENS: usize = 150;

pub struct Planner {
    llm: Arc<dyn TextGenerator>,
    max_tokens: usize,
}

impl Planner {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            llm,
            max_tokens: DEFAULT_PLANNER_MAX_TOKENS,
        }
    }

    /// Override the output bound for planning calls.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if `max_tokens` is zero.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Result<Self, EngineError> {
        if max_tokens == 0 {
            return Err(EngineError::Config(
                "planner_max_tokens must be at least 1".to_string(),
            ));
        }
        self.max_tokens = max_tokens;
        Ok(self)
    }

    /// Decide which agent should handle `user_text`.
    ///
    /// Returns the model's answer, trimmed and lower-cased.
    pub async fn decide_next_action(&self, user_text: &str) -> Result<String, EngineError> {
        let prompt = Self::build_prompt(user_text);
        let decision = self.llm.generate(&prompt, self.max_tokens).await?;
        let label = decision.trim().to_lowercase();

        tracing::debug!("Planner ({}) decided: {:?}", self.llm.name(), label);
        Ok(label)
    }

    /// Instruction template embedding the user's message
    pub fn build_prompt(user_text: &str) -> String {
        format!(
            "You are a planning assistant.\n\
             The user said: \"{}\"\n\
             Decide which agent to use: task, email, report, or chat only.\n\
             Answer in one word.",
            user_text
        )
    }
}
