use tokio::sync::mpsc;

use super::LocalizedContent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast. Texts are kept in every language so the front end renders
/// whatever language is active when it gets around to showing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: LocalizedContent,
    pub description: Option<LocalizedContent>,
}

impl Notice {
    pub fn success(title: LocalizedContent) -> Notice {
        return Notice {
            level: NoticeLevel::Success,
            title,
            description: None,
        };
    }

    pub fn error(title: LocalizedContent) -> Notice {
        return Notice {
            level: NoticeLevel::Error,
            title,
            description: None,
        };
    }

    pub fn with_description(mut self, description: LocalizedContent) -> Notice {
        self.description = Some(description);
        return self;
    }

    /// Hands the notice to the front end. A closed channel only means nobody
    /// is listening anymore.
    pub fn send(self, tx: &mpsc::UnboundedSender<Event>) {
        if let Err(err) = tx.send(Event::Notice(self)) {
            tracing::warn!(error = ?err, "notice dropped");
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetTimer {
    LauncherDue,
    BubbleExpired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Notice(Notice),
    WidgetTimer(WidgetTimer),
}
