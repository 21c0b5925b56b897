#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat transcript entry. Lives only as long as the widget does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> ChatMessage {
        return ChatMessage {
            role: Role::User,
            content: content.to_string(),
        };
    }

    pub fn assistant(content: &str) -> ChatMessage {
        return ChatMessage {
            role: Role::Assistant,
            content: content.to_string(),
        };
    }
}
