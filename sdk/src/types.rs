//! Conversation types

use serde::{Deserialize, Serialize};
use std::fmt;

/// One exchange: what the user said and what the assistant answered.
///
/// Turns are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    user: String,
    assistant: String,
}

impl Turn {
    /// Create a new turn
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    /// The user's text
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The assistant's reply
    pub fn assistant(&self) -> &str {
        &self.assistant
    }
}

/// Known intent labels a planner is asked to choose from.
///
/// The planner itself returns free text; this enum only classifies a label
/// after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Task management
    Task,

    /// Email drafting
    Email,

    /// Report generation
    Report,

    /// Plain conversation
    Chat,
}

impl Intent {
    /// All known intents, in prompt order
    pub const ALL: [Intent; 4] = [Intent::Task, Intent::Email, Intent::Report, Intent::Chat];

    /// Classify a planner label. Matching ignores case and surrounding
    /// whitespace/punctuation; anything else yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == normalized)
    }

    /// Lowercase label for this intent
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Task => "task",
            Intent::Email => "email",
            Intent::Report => "report",
            Intent::Chat => "chat",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
