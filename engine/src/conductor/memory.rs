//! Conversation Memory
//!
//! A bounded FIFO of [`Turn`]s. Once the buffer holds `capacity` turns, every
//! new turn evicts the oldest one. The most recent turns can be rendered as a
//! plain-text transcript to give the model conversational context.

use sdk::errors::EngineError;
use sdk::types::Turn;
use std::collections::VecDeque;
use std::fmt;

/// Default number of retained turns
pub const DEFAULT_MAX_MEMORY: usize = 10;

/// Default number of turns rendered into a prompt
pub const DEFAULT_CONTEXT_TURNS: usize = 5;

/// Bounded history of conversational turns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBuffer {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl MemoryBuffer {
    /// Create an empty buffer holding at most `capacity` turns.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::Config(
                "max_memory must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Record a turn, evicting the oldest one if the buffer is full.
    pub fn append_turn(&mut self, user_text: impl Into<String>, assistant_text: impl Into<String>) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
            tracing::debug!("Memory full ({} turns), evicted oldest turn", self.capacity);
        }
        self.turns.push_back(Turn::new(user_text, assistant_text));
    }

    /// Render the last `min(limit, len)` turns as a transcript.
    ///
    /// Each turn becomes `User: <text>` and `AI: <text>` on separate lines.
    /// The result is trimmed; an empty buffer (or `limit == 0`) yields `""`.
    pub fn render_context(&self, limit: usize) -> String {
        let skip = self.turns.len().saturating_sub(limit);
        self.turns
            .iter()
            .skip(skip)
            .map(|turn| format!("User: {}\nAI: {}", turn.user(), turn.assistant()))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Remove every turn. Calling it on an empty buffer does nothing.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Number of turns currently held
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the buffer holds no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Maximum number of turns retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Turns in chronological order
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self {
            turns: VecDeque::with_capacity(DEFAULT_MAX_MEMORY),
            capacity: DEFAULT_MAX_MEMORY,
        }
    }
}

impl fmt::Display for MemoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryBuffer({}/{} turns)", self.turns.len(), self.capacity)
    }
}
