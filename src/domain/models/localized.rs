#[cfg(test)]
#[path = "localized_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::Language;

/// The same string content in each of the three site languages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedContent {
    pub ru: String,
    pub en: String,
    pub uz: String,
}

impl LocalizedContent {
    pub fn new(ru: &str, en: &str, uz: &str) -> LocalizedContent {
        return LocalizedContent {
            ru: ru.to_string(),
            en: en.to_string(),
            uz: uz.to_string(),
        };
    }

    /// Identical text for every language, used for untranslated remote text.
    pub fn uniform(text: &str) -> LocalizedContent {
        return LocalizedContent::new(text, text, text);
    }

    /// Repairs whatever the store holds for a localized column. Objects keep
    /// their string members and default the rest to empty, scalars are copied
    /// into every language, and null becomes three empty strings.
    pub fn coerce(value: &Value) -> LocalizedContent {
        match value {
            Value::Object(map) => {
                let member = |key: &str| {
                    return map
                        .get(key)
                        .and_then(|e| return e.as_str())
                        .unwrap_or("")
                        .to_string();
                };

                return LocalizedContent {
                    ru: member("ru"),
                    en: member("en"),
                    uz: member("uz"),
                };
            }
            Value::Null => return LocalizedContent::default(),
            Value::String(text) => return LocalizedContent::uniform(text),
            other => return LocalizedContent::uniform(&other.to_string()),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Ru => return &self.ru,
            Language::En => return &self.en,
            Language::Uz => return &self.uz,
        }
    }

    pub fn set(&mut self, lang: Language, text: &str) {
        match lang {
            Language::Ru => self.ru = text.to_string(),
            Language::En => self.en = text.to_string(),
            Language::Uz => self.uz = text.to_string(),
        }
    }

    /// Active language's text, falling back to English when it is empty.
    pub fn resolve(&self, lang: Language) -> &str {
        let text = self.get(lang);
        if text.is_empty() {
            return &self.en;
        }

        return text;
    }

    pub fn values(&self) -> [&str; 3] {
        return [&self.ru, &self.en, &self.uz];
    }
}
