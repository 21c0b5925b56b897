use chrono::Utc;

use super::is_valid_url;
use super::FieldError;
use super::FormField;
use super::LocalizedContent;
use super::Project;
use super::ProjectForm;

fn valid_form() -> ProjectForm {
    return ProjectForm {
        title: LocalizedContent::new("Магазин", "Storefront", "Do'kon"),
        description: LocalizedContent::new("Описание", "Description", "Tavsif"),
        technologies: "React, TypeScript".to_string(),
        website_url: "https://storefront.example.com".to_string(),
        github_url: "".to_string(),
        featured: false,
    };
}

#[test]
fn it_accepts_a_valid_form() {
    assert!(valid_form().validate().is_empty());
}

#[test]
fn it_requires_every_language() {
    let mut form = valid_form();
    form.set(FormField::TitleUz, "");
    form.set(FormField::DescriptionRu, "");

    let errors = form.validate();
    assert_eq!(
        errors,
        vec![
            FieldError {
                field: FormField::TitleUz,
                message: "Required".to_string(),
            },
            FieldError {
                field: FormField::DescriptionRu,
                message: "Required".to_string(),
            },
        ]
    );
}

#[test]
fn it_rejects_malformed_website_url() {
    let mut form = valid_form();
    form.website_url = "storefront".to_string();

    let errors = form.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "website_url: Must be a valid URL");
}

#[test]
fn it_allows_empty_github_url_but_not_malformed() {
    let mut form = valid_form();
    assert!(form.validate().is_empty());

    form.github_url = "not a url".to_string();
    let errors = form.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, FormField::GithubUrl);
}

#[test]
fn it_parses_technologies() {
    let mut form = valid_form();
    form.technologies = " React ,, Node.js , ,Rust".to_string();

    assert_eq!(form.technologies_list(), vec!["React", "Node.js", "Rust"]);
}

#[test]
fn it_seeds_from_project() {
    let now = Utc::now();
    let project = Project {
        id: "abc".to_string(),
        title: LocalizedContent::new("а", "b", "c"),
        description: LocalizedContent::new("d", "e", "f"),
        technologies: vec!["React".to_string(), "Vite".to_string()],
        image_url: "https://cdn.example.com/a.png".to_string(),
        website_url: "https://a.example.com".to_string(),
        github_url: None,
        featured: true,
        created_at: now,
        updated_at: now,
    };

    let form = ProjectForm::from_project(&project);
    assert_eq!(form.get(FormField::TitleRu), "а");
    assert_eq!(form.get(FormField::DescriptionUz), "f");
    assert_eq!(form.technologies, "React, Vite");
    assert_eq!(form.github_url, "");
    assert!(form.featured);
}

#[test]
fn it_builds_new_project_payload() {
    let mut form = valid_form();
    form.github_url = "https://github.com/example/storefront".to_string();

    let project = form.to_new_project("https://cdn.example.com/s.png");
    assert_eq!(project.technologies, vec!["React", "TypeScript"]);
    assert_eq!(project.image_url, "https://cdn.example.com/s.png");
    assert_eq!(
        project.github_url,
        Some("https://github.com/example/storefront".to_string())
    );
}

#[test]
fn it_builds_patch_clearing_github_url() {
    let patch = valid_form().to_patch("https://cdn.example.com/s.png");
    assert_eq!(patch.github_url, Some(None));
    assert_eq!(patch.featured, Some(false));
    assert_eq!(patch.updated_at, None);
}

#[test]
fn it_parses_field_names() {
    assert_eq!(FormField::parse("title-en"), Some(FormField::TitleEn));
    assert_eq!(FormField::parse("website_url"), Some(FormField::WebsiteUrl));
    assert_eq!(FormField::parse("image"), None);
}

#[test]
fn it_sets_featured_from_text() {
    let mut form = valid_form();
    form.set(FormField::Featured, "true");
    assert!(form.featured);
    form.set(FormField::Featured, "no");
    assert!(!form.featured);
}

#[test]
fn it_validates_urls() {
    assert!(is_valid_url("https://example.com"));
    assert!(is_valid_url("http://x.com/path?q=1"));
    assert!(!is_valid_url("example.com"));
    assert!(!is_valid_url(""));
}
