#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use super::texts;
use super::Language;
use super::Role;

/// One turn of the conversation sent to the completion backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTurn {
    pub role: Role,
    pub text: String,
}

/// The full request for one reply. Earlier chat turns are never resent, so
/// the backend only ever sees the framing and the newest user message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub turns: Vec<PromptTurn>,
}

impl CompletionPrompt {
    pub fn for_language(lang: Language, text: &str) -> CompletionPrompt {
        let system = format!(
            "{}\n\nDeveloper Information:\n{}",
            texts::chat_system_prompt().get(lang),
            texts::DEVELOPER_INFO
        );

        return CompletionPrompt {
            turns: vec![
                PromptTurn {
                    role: Role::User,
                    text: system,
                },
                PromptTurn {
                    role: Role::Assistant,
                    text: texts::CHAT_ACKNOWLEDGMENT.to_string(),
                },
                PromptTurn {
                    role: Role::User,
                    text: text.to_string(),
                },
            ],
        };
    }

    #[cfg(test)]
    pub fn user_text(&self) -> &str {
        return self
            .turns
            .last()
            .map(|e| return e.text.as_str())
            .unwrap_or("");
    }
}

/// What the backend made of a prompt. API level errors are a normal reply;
/// transport and parse failures are `Err` from `get_completion`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionReply {
    Text(String),
    ApiError { code: i64, message: String },
}

#[async_trait]
pub trait CompletionBackend {
    /// Used before starting a chat to verify the backend is configured and
    /// reachable.
    async fn health_check(&self) -> Result<()>;

    async fn get_completion(&self, prompt: CompletionPrompt) -> Result<CompletionReply>;
}

pub type CompletionBackendBox = Box<dyn CompletionBackend + Send + Sync>;
