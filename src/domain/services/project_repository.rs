#[cfg(test)]
#[path = "project_repository_test.rs"]
mod tests;

use anyhow::Result;
use chrono::Utc;

use crate::domain::models::NewProject;
use crate::domain::models::Project;
use crate::domain::models::ProjectPatch;
use crate::domain::models::ProjectStoreBox;

/// Project CRUD over the remote store. Every row is normalized on the way
/// out. Writes are last-write-wins, there is no version check.
pub struct ProjectRepository {
    store: ProjectStoreBox,
}

impl ProjectRepository {
    pub fn new(store: ProjectStoreBox) -> ProjectRepository {
        return ProjectRepository { store };
    }

    /// Newest first. Unlike `list`, failures are returned to the caller.
    pub async fn try_list(&self) -> Result<Vec<Project>> {
        let rows = self.store.select_all().await?;
        return Ok(rows.into_iter().map(Project::from).collect());
    }

    /// Newest first. A failed fetch is logged and reads as an empty list.
    pub async fn list(&self) -> Vec<Project> {
        match self.try_list().await {
            Ok(projects) => return projects,
            Err(err) => {
                tracing::error!(error = ?err, "failed to fetch projects");
                return vec![];
            }
        }
    }

    pub async fn create(&self, project: &NewProject) -> Option<Project> {
        match self.store.insert(project).await {
            Ok(row) => return Some(Project::from(row)),
            Err(err) => {
                tracing::error!(error = ?err, "failed to create project");
                return None;
            }
        }
    }

    /// Stamps `updated_at` with the current time before writing, so even an
    /// empty patch touches the row.
    pub async fn update(&self, id: &str, patch: &ProjectPatch) -> Option<Project> {
        let mut patch = patch.clone();
        patch.updated_at = Some(Utc::now());

        match self.store.update(id, &patch).await {
            Ok(row) => return Some(Project::from(row)),
            Err(err) => {
                tracing::error!(error = ?err, id = id, "failed to update project");
                return None;
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        if let Err(err) = self.store.delete(id).await {
            tracing::error!(error = ?err, id = id, "failed to delete project");
            return false;
        }

        return true;
    }
}
