//! Response Generator
//!
//! Produces the assistant's reply for one user message. The prompt carries the
//! most recent turns from [`MemoryBuffer`]; the finished exchange is recorded
//! back into the same buffer.

use sdk::errors::EngineError;
use std::sync::Arc;

use super::memory::{MemoryBuffer, DEFAULT_CONTEXT_TURNS};
use crate::llm::TextGenerator;

/// Default output bound for a reply
pub const DEFAULT_MAX_TOKENS: usize = 150;

pub struct ResponseGenerator {
    llm: Arc<dyn TextGenerator>,
    memory: MemoryBuffer,
    context_turns: usize,
}

impl ResponseGenerator {
    /// Create a generator that owns `memory` for the rest of the session.
    pub fn new(llm: Arc<dyn TextGenerator>, memory: MemoryBuffer) -> Self {
        Self {
            llm,
            memory,
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }

    /// Number of recent turns rendered into each prompt (builder).
    pub fn with_context_turns(mut self, context_turns: usize) -> Self {
        self.context_turns = context_turns;
        self
    }

    /// Generate a reply to `user_text` bounded to `max_tokens` output tokens.
    ///
    /// On success the exchange is appended to memory. On failure memory is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// - `EngineError::Config` if `max_tokens` is zero
    /// - `EngineError::Generation` if the backend call fails
    pub async fn generate(
        &mut self,
        user_text: &str,
        max_tokens: usize,
    ) -> Result<String, EngineError> {
        if max_tokens == 0 {
            return Err(EngineError::Config(
                "max_tokens must be at least 1".to_string(),
            ));
        }

        let context = self.memory.render_context(self.context_turns);
        let prompt = Self::build_prompt(&context, user_text);

        let raw = self.llm.generate(&prompt, max_tokens).await?;
        let reply = raw.trim().to_string();

        self.memory.append_turn(user_text, reply.as_str());
        tracing::debug!("Recorded turn, memory now {}", self.memory);

        Ok(reply)
    }

    /// Prompt layout: transcript, blank line, then the new message.
    pub fn build_prompt(context: &str, user_text: &str) -> String {
        format!(
            "Conversation so far:\n{}\n\nUser: {}\nAI:",
            context, user_text
        )
    }

    /// Conversation memory
    pub fn memory(&self) -> &MemoryBuffer {
        &self.memory
    }

    /// Mutable access to conversation memory
    pub fn memory_mut(&mut self) -> &mut MemoryBuffer {
        &mut self.memory
    }

    /// Number of turns rendered into each prompt
    pub fn context_turns(&self) -> usize {
        self.context_turns
    }
}
