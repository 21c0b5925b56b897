use serde_json::json;
use strum::IntoEnumIterator;

use super::Language;
use super::LocalizedContent;

#[test]
fn it_resolves_active_language() {
    let content = LocalizedContent::new("Привет", "Hello", "Salom");
    assert_eq!(content.resolve(Language::Ru), "Привет");
    assert_eq!(content.resolve(Language::En), "Hello");
    assert_eq!(content.resolve(Language::Uz), "Salom");
}

#[test]
fn it_falls_back_to_english_when_empty() {
    let content = LocalizedContent::new("", "Hello", "");
    for lang in Language::iter() {
        assert_eq!(content.resolve(lang), "Hello");
    }
}

#[test]
fn it_resolves_every_language_by_rule() {
    let samples = vec![
        LocalizedContent::new("a", "b", "c"),
        LocalizedContent::new("", "b", "c"),
        LocalizedContent::new("a", "", ""),
        LocalizedContent::default(),
    ];

    for content in samples {
        for lang in Language::iter() {
            let expected = if content.get(lang).is_empty() {
                content.en.as_str()
            } else {
                content.get(lang)
            };
            assert_eq!(content.resolve(lang), expected);
        }
    }
}

#[test]
fn it_coerces_objects_with_missing_members() {
    let content = LocalizedContent::coerce(&json!({ "en": "Only english", "ru": 42 }));
    assert_eq!(content, LocalizedContent::new("", "Only english", ""));
}

#[test]
fn it_coerces_plain_strings() {
    let content = LocalizedContent::coerce(&json!("Landing page"));
    assert_eq!(content, LocalizedContent::uniform("Landing page"));
}

#[test]
fn it_coerces_null_to_empty() {
    let content = LocalizedContent::coerce(&json!(null));
    assert_eq!(content, LocalizedContent::default());
}

#[test]
fn it_coerces_numbers_to_text() {
    let content = LocalizedContent::coerce(&json!(7));
    assert_eq!(content, LocalizedContent::uniform("7"));
}

#[test]
fn it_sets_single_language() {
    let mut content = LocalizedContent::default();
    content.set(Language::Uz, "Loyiha");
    assert_eq!(content.get(Language::Uz), "Loyiha");
    assert_eq!(content.values(), ["", "", "Loyiha"]);
}
