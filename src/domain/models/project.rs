#[cfg(test)]
#[path = "project_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::LocalizedContent;

/// One portfolio entry. Ids and timestamps are owned by the remote store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: LocalizedContent,
    pub description: LocalizedContent,
    pub technologies: Vec<String>,
    pub image_url: String,
    pub website_url: String,
    pub github_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project row as the store hands it back. Nothing here is trusted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Project {
        return Project {
            id: row.id,
            title: LocalizedContent::coerce(&row.title),
            description: LocalizedContent::coerce(&row.description),
            technologies: row.technologies.unwrap_or_default(),
            image_url: row.image_url.unwrap_or_default(),
            website_url: row.website_url.unwrap_or_default(),
            github_url: normalize_optional_url(row.github_url),
            featured: row.featured.unwrap_or(false),
            created_at: row.created_at.unwrap_or_default(),
            updated_at: row.updated_at.unwrap_or_default(),
        };
    }
}

/// Everything needed to insert a project. The store assigns the rest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: LocalizedContent,
    pub description: LocalizedContent,
    pub technologies: Vec<String>,
    pub image_url: String,
    pub website_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub featured: bool,
}

impl NewProject {
    pub fn with_github_url(mut self, github_url: &str) -> NewProject {
        self.github_url = normalize_optional_url(Some(github_url.to_string()));
        return self;
    }
}

/// Partial update. Unset fields are left out of the request body, and
/// `github_url: Some(None)` clears the stored link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<LocalizedContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectPatch {
    pub fn with_github_url(mut self, github_url: &str) -> ProjectPatch {
        self.github_url = Some(normalize_optional_url(Some(github_url.to_string())));
        return self;
    }
}

fn normalize_optional_url(url: Option<String>) -> Option<String> {
    return url
        .map(|e| return e.trim().to_string())
        .filter(|e| return !e.is_empty());
}
