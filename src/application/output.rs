#[cfg(test)]
#[path = "output_test.rs"]
mod tests;

use owo_colors::OwoColorize;
use owo_colors::Stream;
use tokio::sync::mpsc;

use crate::domain::models::ChatMessage;
use crate::domain::models::Event;
use crate::domain::models::FieldError;
use crate::domain::models::Language;
use crate::domain::models::Notice;
use crate::domain::models::NoticeLevel;
use crate::domain::models::Project;
use crate::domain::models::Role;

pub fn notice_text(notice: &Notice, lang: Language) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "✓",
        NoticeLevel::Error => "✗",
    };

    let mut text = format!("{marker} {}", notice.title.resolve(lang));
    if let Some(description) = &notice.description {
        text = format!("{text}: {}", description.resolve(lang));
    }

    return text;
}

pub fn print_notice(notice: &Notice, lang: Language) {
    let text = notice_text(notice, lang);
    match notice.level {
        NoticeLevel::Success => {
            println!(
                "{}",
                text.if_supports_color(Stream::Stdout, |e| return e.green())
            );
        }
        NoticeLevel::Error => {
            eprintln!(
                "{}",
                text.if_supports_color(Stream::Stderr, |e| return e.red())
            );
        }
    }
}

/// Prints every notice queued so far. Other events are dropped.
pub fn print_notices(rx: &mut mpsc::UnboundedReceiver<Event>, lang: Language) {
    while let Ok(event) = rx.try_recv() {
        if let Event::Notice(notice) = event {
            print_notice(&notice, lang);
        }
    }
}

pub fn project_text(project: &Project, lang: Language) -> String {
    let mut lines = vec![format!("{} ({})", project.title.resolve(lang), project.id)];

    let description = project.description.resolve(lang);
    if !description.is_empty() {
        lines.push(format!("  {description}"));
    }
    if !project.technologies.is_empty() {
        lines.push(format!("  Technologies: {}", project.technologies.join(", ")));
    }
    lines.push(format!("  Website: {}", project.website_url));
    if let Some(github_url) = &project.github_url {
        lines.push(format!("  GitHub: {github_url}"));
    }
    lines.push(format!("  Image: {}", project.image_url));
    if project.featured {
        lines.push("  Featured".to_string());
    }

    return lines.join("\n");
}

pub fn print_projects(projects: &[Project], lang: Language) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    let blocks = projects
        .iter()
        .map(|project| {
            let text = project_text(project, lang);
            let (title, rest) = text.split_once('\n').unwrap_or((&text, ""));
            return format!(
                "{}\n{rest}",
                title.if_supports_color(Stream::Stdout, |e| return e.bold())
            );
        })
        .collect::<Vec<String>>();

    println!("{}", blocks.join("\n\n"));
}

pub fn field_errors_text(errors: &[FieldError]) -> String {
    return errors
        .iter()
        .map(|e| return format!("- {e}"))
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn chat_message_text(message: &ChatMessage) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };

    return format!("{speaker}> {}", message.content);
}

pub fn print_chat_message(message: &ChatMessage) {
    let text = chat_message_text(message);
    match message.role {
        Role::User => println!("{text}"),
        Role::Assistant => {
            println!(
                "{}",
                text.if_supports_color(Stream::Stdout, |e| return e.cyan())
            );
        }
    }
}

pub fn print_hint(text: &str) {
    println!(
        "{}",
        text.if_supports_color(Stream::Stdout, |e| return e.dimmed())
    );
}

pub fn print_warning(text: &str) {
    eprintln!(
        "{}",
        text.if_supports_color(Stream::Stderr, |e| return e.yellow())
    );
}
