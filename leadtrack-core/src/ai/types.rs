use serde::{Deserialize, Serialize};

/// Everything sent to the text-generation backend for one turn: the
/// standing instruction text, the bounded recent history, and the trailing
/// situational payload built by the context assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub standing_instructions: String,
    pub history: Vec<HistoryMessage>,
    pub trailing_user_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
}

impl HistoryMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}
