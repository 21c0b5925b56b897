#[cfg(test)]
#[path = "chat_widget_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::domain::models::texts;
use crate::domain::models::ChatMessage;
use crate::domain::models::CompletionBackendBox;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::CompletionReply;
use crate::domain::models::Event;
use crate::domain::models::Language;
use crate::domain::models::WidgetTimer;

pub const LAUNCHER_DELAY: Duration = Duration::from_secs(5);
pub const BUBBLE_DURATION: Duration = Duration::from_secs(10);

/// A user turn that has been appended but not yet answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    generation: u64,
    pub prompt: CompletionPrompt,
}

/// Emits the launcher and bubble timer events until cancelled.
pub fn start_timers(tx: mpsc::UnboundedSender<Event>, cancel: CancellationToken) -> JoinHandle<()> {
    return tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("widget timers cancelled");
            }
            _ = async {
                time::sleep(LAUNCHER_DELAY).await;
                if tx.send(Event::WidgetTimer(WidgetTimer::LauncherDue)).is_err() {
                    return;
                }

                time::sleep(BUBBLE_DURATION).await;
                if tx.send(Event::WidgetTimer(WidgetTimer::BubbleExpired)).is_err() {
                    tracing::debug!("widget timer receiver closed");
                }
            } => {}
        }
    });
}

/// The consultant chat. Every send carries only the fixed framing and the
/// newest message, so the model never sees earlier turns.
pub struct ChatWidget {
    language: Language,
    is_open: bool,
    seeded: bool,
    messages: Vec<ChatMessage>,
    input: String,
    loading: bool,
    error_details: Option<String>,
    launcher_visible: bool,
    bubble_visible: bool,
    bubble_shown: bool,
    generation: u64,
}

impl ChatWidget {
    pub fn new(language: Language) -> ChatWidget {
        return ChatWidget {
            language,
            is_open: false,
            seeded: false,
            messages: vec![],
            input: "".to_string(),
            loading: false,
            error_details: None,
            launcher_visible: false,
            bubble_visible: false,
            bubble_shown: false,
            generation: 0,
        };
    }

    pub fn language(&self) -> Language {
        return self.language;
    }

    pub fn is_open(&self) -> bool {
        return self.is_open;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        return &self.messages;
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        return &self.input;
    }

    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        return self.loading;
    }

    /// Raw detail of the last failure, kept out of the transcript.
    pub fn error_details(&self) -> Option<&str> {
        return self.error_details.as_deref();
    }

    pub fn launcher_visible(&self) -> bool {
        return self.launcher_visible;
    }

    pub fn bubble_visible(&self) -> bool {
        return self.bubble_visible;
    }

    pub fn can_send(&self) -> bool {
        return !self.loading && !self.input.trim().is_empty();
    }

    fn reset_history(&mut self) {
        self.generation += 1;
        self.messages = vec![ChatMessage::assistant(
            texts::chat_welcome().get(self.language),
        )];
        self.seeded = true;
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.bubble_visible = false;
        if !self.seeded {
            self.reset_history();
        }
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
        self.bubble_visible = false;
    }

    /// An open widget starts over with the new welcome; a closed one does so
    /// the next time it opens.
    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }

        self.language = language;
        if self.is_open {
            self.reset_history();
        } else {
            self.seeded = false;
        }
    }

    pub fn handle_timer(&mut self, timer: WidgetTimer) {
        match timer {
            WidgetTimer::LauncherDue => {
                self.launcher_visible = true;
                if !self.bubble_shown && !self.is_open {
                    self.bubble_visible = true;
                    self.bubble_shown = true;
                }
            }
            WidgetTimer::BubbleExpired => {
                self.bubble_visible = false;
            }
        }
    }

    /// First phase of a send: appends the user turn, clears the input and
    /// marks the widget busy. Returns `None` for blank input or while a
    /// request is already outstanding.
    pub fn begin_send(&mut self) -> Option<PendingTurn> {
        if !self.can_send() {
            return None;
        }

        let content = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::user(&content));
        self.loading = true;
        self.error_details = None;

        return Some(PendingTurn {
            generation: self.generation,
            prompt: CompletionPrompt::for_language(self.language, &content),
        });
    }

    /// Second phase: appends exactly one assistant turn for the outcome. A
    /// reply for a history that has since been reset is dropped.
    pub fn complete_send(&mut self, pending: PendingTurn, outcome: Result<CompletionReply>) {
        self.loading = false;
        if pending.generation != self.generation {
            tracing::debug!(
                generation = pending.generation,
                current = self.generation,
                "discarding stale chat reply"
            );
            return;
        }

        let content = match outcome {
            Ok(CompletionReply::Text(text)) => text,
            Ok(CompletionReply::ApiError { code, message }) => {
                tracing::error!(code = code, message = %message, "completion api error");
                self.error_details = Some(format!("Error {code}: {message}"));
                texts::chat_api_fallback().get(self.language).to_string()
            }
            Err(err) => {
                tracing::error!(error = ?err, "completion request failed");
                self.error_details = Some(format!("Error: {err}"));
                texts::chat_transport_fallback()
                    .get(self.language)
                    .to_string()
            }
        };

        self.messages.push(ChatMessage::assistant(&content));
    }

    pub async fn send(&mut self, backend: &CompletionBackendBox) -> bool {
        let pending = match self.begin_send() {
            Some(pending) => pending,
            None => return false,
        };

        let outcome = backend.get_completion(pending.prompt.clone()).await;
        self.complete_send(pending, outcome);
        return true;
    }
}
