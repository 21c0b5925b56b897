#[cfg(test)]
#[path = "project_query_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use super::ProjectRepository;
use crate::domain::models::Project;

/// Cached project list shared by every reader. Successful mutations call
/// `invalidate` so the next read goes back to the store.
#[derive(Clone)]
pub struct ProjectQuery {
    repository: Arc<ProjectRepository>,
    cache: Arc<Mutex<Option<Vec<Project>>>>,
}

impl ProjectQuery {
    pub fn new(repository: Arc<ProjectRepository>) -> ProjectQuery {
        return ProjectQuery {
            repository,
            cache: Arc::new(Mutex::new(None)),
        };
    }

    pub fn repository(&self) -> &ProjectRepository {
        return &self.repository;
    }

    /// Failed fetches are not cached.
    pub async fn try_projects(&self) -> Result<Vec<Project>> {
        let mut cache = self.cache.lock().await;
        if let Some(projects) = cache.as_ref() {
            return Ok(projects.clone());
        }

        let projects = self.repository.try_list().await?;
        *cache = Some(projects.clone());
        return Ok(projects);
    }

    pub async fn projects(&self) -> Vec<Project> {
        match self.try_projects().await {
            Ok(projects) => return projects,
            Err(err) => {
                tracing::error!(error = ?err, "failed to fetch projects");
                return vec![];
            }
        }
    }

    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    #[cfg(test)]
    pub async fn is_cached(&self) -> bool {
        return self.cache.lock().await.is_some();
    }
}
