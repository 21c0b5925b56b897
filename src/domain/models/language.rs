#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
    Uz,
}

impl Language {
    pub fn parse(text: &str) -> Option<Language> {
        let text = text.trim().to_lowercase();
        return Language::iter().find(|e| return e.to_string() == text);
    }
}
