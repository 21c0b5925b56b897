#[cfg(test)]
#[path = "language_context_test.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::models::Language;
use crate::domain::models::LocalizedContent;

/// Owner of the active site language. Set once at startup, changed only
/// through `set`, and observed by whoever subscribes.
#[derive(Clone)]
pub struct LanguageContext {
    tx: Arc<watch::Sender<Language>>,
}

impl Default for LanguageContext {
    fn default() -> LanguageContext {
        return LanguageContext::new(Language::default());
    }
}

impl LanguageContext {
    pub fn new(lang: Language) -> LanguageContext {
        let (tx, _rx) = watch::channel(lang);
        return LanguageContext { tx: Arc::new(tx) };
    }

    pub fn language(&self) -> Language {
        return *self.tx.borrow();
    }

    /// Returns true when the language actually changed.
    pub fn set(&self, lang: Language) -> bool {
        let previous = self.tx.send_replace(lang);
        if previous != lang {
            tracing::debug!(from = %previous, to = %lang, "language changed");
            return true;
        }

        return false;
    }

    pub fn subscribe(&self) -> watch::Receiver<Language> {
        return self.tx.subscribe();
    }

    pub fn t<'a>(&self, content: &'a LocalizedContent) -> &'a str {
        return content.resolve(self.language());
    }
}
