#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

use std::fmt;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use url::Url;

use super::Language;
use super::LocalizedContent;
use super::NewProject;
use super::Project;
use super::ProjectPatch;

const REQUIRED: &str = "Required";
const INVALID_URL: &str = "Must be a valid URL";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FormField {
    TitleRu,
    TitleEn,
    TitleUz,
    DescriptionRu,
    DescriptionEn,
    DescriptionUz,
    Technologies,
    WebsiteUrl,
    GithubUrl,
    Featured,
}

impl FormField {
    pub fn parse(text: &str) -> Option<FormField> {
        let text = text.trim().replace('-', "_");
        return FormField::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Constraint {
    Required,
    Url,
    OptionalUrl,
    None,
}

fn constraint(field: FormField) -> Constraint {
    match field {
        FormField::WebsiteUrl => return Constraint::Url,
        FormField::GithubUrl => return Constraint::OptionalUrl,
        FormField::Featured => return Constraint::None,
        _ => return Constraint::Required,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}: {}", self.field, self.message);
    }
}

/// Flat admin form, one field per language per localized attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: LocalizedContent,
    pub description: LocalizedContent,
    pub technologies: String,
    pub website_url: String,
    pub github_url: String,
    pub featured: bool,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> ProjectForm {
        return ProjectForm {
            title: project.title.clone(),
            description: project.description.clone(),
            technologies: project.technologies.join(", "),
            website_url: project.website_url.clone(),
            github_url: project.github_url.clone().unwrap_or_default(),
            featured: project.featured,
        };
    }

    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::TitleRu => return self.title.get(Language::Ru).to_string(),
            FormField::TitleEn => return self.title.get(Language::En).to_string(),
            FormField::TitleUz => return self.title.get(Language::Uz).to_string(),
            FormField::DescriptionRu => return self.description.get(Language::Ru).to_string(),
            FormField::DescriptionEn => return self.description.get(Language::En).to_string(),
            FormField::DescriptionUz => return self.description.get(Language::Uz).to_string(),
            FormField::Technologies => return self.technologies.to_string(),
            FormField::WebsiteUrl => return self.website_url.to_string(),
            FormField::GithubUrl => return self.github_url.to_string(),
            FormField::Featured => return self.featured.to_string(),
        }
    }

    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::TitleRu => self.title.set(Language::Ru, value),
            FormField::TitleEn => self.title.set(Language::En, value),
            FormField::TitleUz => self.title.set(Language::Uz, value),
            FormField::DescriptionRu => self.description.set(Language::Ru, value),
            FormField::DescriptionEn => self.description.set(Language::En, value),
            FormField::DescriptionUz => self.description.set(Language::Uz, value),
            FormField::Technologies => self.technologies = value.to_string(),
            FormField::WebsiteUrl => self.website_url = value.to_string(),
            FormField::GithubUrl => self.github_url = value.to_string(),
            FormField::Featured => {
                self.featured = matches!(value.trim(), "true" | "1" | "yes" | "on")
            }
        }
    }

    /// Runs every field constraint and returns the failures in field order.
    pub fn validate(&self) -> Vec<FieldError> {
        return FormField::iter()
            .filter_map(|field| {
                let value = self.get(field);
                let message = match constraint(field) {
                    Constraint::Required if value.is_empty() => REQUIRED,
                    Constraint::Url if !is_valid_url(&value) => INVALID_URL,
                    Constraint::OptionalUrl if !value.is_empty() && !is_valid_url(&value) => {
                        INVALID_URL
                    }
                    _ => return None,
                };

                return Some(FieldError {
                    field,
                    message: message.to_string(),
                });
            })
            .collect();
    }

    /// Splits the comma separated technologies field, dropping blanks.
    pub fn technologies_list(&self) -> Vec<String> {
        return self
            .technologies
            .split(',')
            .map(|e| return e.trim().to_string())
            .filter(|e| return !e.is_empty())
            .collect();
    }

    pub fn to_new_project(&self, image_url: &str) -> NewProject {
        return NewProject {
            title: self.title.clone(),
            description: self.description.clone(),
            technologies: self.technologies_list(),
            image_url: image_url.to_string(),
            website_url: self.website_url.to_string(),
            github_url: None,
            featured: self.featured,
        }
        .with_github_url(&self.github_url);
    }

    pub fn to_patch(&self, image_url: &str) -> ProjectPatch {
        return ProjectPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            technologies: Some(self.technologies_list()),
            image_url: Some(image_url.to_string()),
            website_url: Some(self.website_url.to_string()),
            github_url: None,
            featured: Some(self.featured),
            updated_at: None,
        }
        .with_github_url(&self.github_url);
    }
}

pub fn is_valid_url(value: &str) -> bool {
    return Url::parse(value).is_ok();
}
