use strum::VariantNames;

use super::Language;

#[test]
fn it_parses_known_languages() {
    assert_eq!(Language::parse("ru"), Some(Language::Ru));
    assert_eq!(Language::parse("en"), Some(Language::En));
    assert_eq!(Language::parse(" UZ "), Some(Language::Uz));
}

#[test]
fn it_rejects_unknown_languages() {
    assert_eq!(Language::parse("de"), None);
    assert_eq!(Language::parse(""), None);
}

#[test]
fn it_defaults_to_russian() {
    assert_eq!(Language::default(), Language::Ru);
}

#[test]
fn it_lists_variants_in_order() {
    assert_eq!(Language::VARIANTS, &["ru", "en", "uz"]);
}

#[test]
fn it_serializes_lowercase() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_string(&Language::Uz)?, "\"uz\"");
    let lang: Language = serde_json::from_str("\"en\"")?;
    assert_eq!(lang, Language::En);

    return Ok(());
}
