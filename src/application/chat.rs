#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::application::output;
use crate::configuration::Config;
use crate::domain::models::texts;
use crate::domain::models::CompletionBackendBox;
use crate::domain::models::Event;
use crate::domain::models::Language;
use crate::domain::services::chat_widget::start_timers;
use crate::domain::services::ChatWidget;
use crate::domain::services::LanguageContext;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Open,
    Close,
    Toggle,
    Lang(Language),
    Quit,
    Message(String),
    Unknown(String),
    Empty,
}

impl ReplCommand {
    pub fn parse(line: &str) -> ReplCommand {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        if !line.starts_with('/') {
            return ReplCommand::Message(line.to_string());
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let arg = parts.next().unwrap_or_default();

        match command {
            "/open" => return ReplCommand::Open,
            "/close" => return ReplCommand::Close,
            "/toggle" => return ReplCommand::Toggle,
            "/quit" | "/exit" => return ReplCommand::Quit,
            "/lang" => match Language::parse(arg) {
                Some(lang) => return ReplCommand::Lang(lang),
                None => return ReplCommand::Unknown(line.to_string()),
            },
            _ => return ReplCommand::Unknown(line.to_string()),
        }
    }
}

fn print_transcript(widget: &ChatWidget, lang: &LanguageContext) {
    output::print_hint(&format!("-- {} --", lang.t(&texts::chat_header())));
    for message in widget.messages() {
        output::print_chat_message(message);
    }
}

fn handle_event(widget: &mut ChatWidget, lang: &LanguageContext, event: Event) {
    match event {
        Event::Notice(notice) => output::print_notice(&notice, lang.language()),
        Event::WidgetTimer(timer) => {
            let launcher_was_visible = widget.launcher_visible();
            widget.handle_timer(timer);
            if widget.bubble_visible() {
                output::print_hint(lang.t(&texts::chat_bubble()));
            } else if !launcher_was_visible && widget.launcher_visible() && !widget.is_open() {
                output::print_hint("Type /open to start chatting.");
            }
        }
    }
}

async fn send(
    widget: &mut ChatWidget,
    lang: &LanguageContext,
    backend: &CompletionBackendBox,
    text: &str,
) {
    if !widget.is_open() {
        widget.open();
        print_transcript(widget, lang);
    }

    widget.set_input(text);
    if !widget.can_send() {
        return;
    }

    output::print_hint("...");
    widget.send(backend).await;

    if let Some(message) = widget.messages().last() {
        output::print_chat_message(message);
    }
    if let Some(details) = widget.error_details() {
        output::print_warning(details);
    }
}

/// Line based chat loop. Reads stdin until `/quit` or end of input while the
/// widget timers run in the background.
pub async fn start(backend: CompletionBackendBox) -> Result<()> {
    let lang = LanguageContext::new(Config::language());
    let mut widget = ChatWidget::new(lang.language());

    if let Err(err) = backend.health_check().await {
        tracing::warn!(error = ?err, "chat backend health check failed");
        output::print_warning(&format!("Chat backend is not reachable: {err}"));
    }

    let mut lang_rx = lang.subscribe();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let cancel = CancellationToken::new();
    let timers = start_timers(tx, cancel.clone());

    output::print_hint(lang.t(&texts::chat_placeholder()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                match ReplCommand::parse(&line) {
                    ReplCommand::Open => {
                        widget.open();
                        print_transcript(&widget, &lang);
                    }
                    ReplCommand::Close => widget.close(),
                    ReplCommand::Toggle => {
                        widget.toggle();
                        if widget.is_open() {
                            print_transcript(&widget, &lang);
                        }
                    }
                    ReplCommand::Lang(next) => {
                        lang.set(next);
                    }
                    ReplCommand::Quit => break,
                    ReplCommand::Message(text) => send(&mut widget, &lang, &backend, &text).await,
                    ReplCommand::Unknown(text) => {
                        output::print_warning(&format!("Unknown command: {text}"));
                    }
                    ReplCommand::Empty => {}
                }
            }
            Ok(()) = lang_rx.changed() => {
                let next = *lang_rx.borrow_and_update();
                widget.set_language(next);
                if widget.is_open() {
                    print_transcript(&widget, &lang);
                }
            }
            Some(event) = rx.recv() => handle_event(&mut widget, &lang, event),
        }
    }

    cancel.cancel();
    timers.await?;

    return Ok(());
}
