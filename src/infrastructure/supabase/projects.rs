#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;

use super::check_status;
use super::eq_filter;
use super::SupabaseClient;
use crate::domain::models::NewProject;
use crate::domain::models::ProjectPatch;
use crate::domain::models::ProjectRow;
use crate::domain::models::ProjectStore;

const TABLE: &str = "rest/v1/projects";

/// The `projects` table over the REST interface.
#[derive(Clone, Default)]
pub struct SupabaseProjects {
    client: SupabaseClient,
}

impl SupabaseProjects {
    pub fn new(client: SupabaseClient) -> SupabaseProjects {
        return SupabaseProjects { client };
    }
}

fn first_row(rows: Vec<ProjectRow>, action: &str) -> Result<ProjectRow> {
    match rows.into_iter().next() {
        Some(row) => return Ok(row),
        None => bail!("{action} returned no rows"),
    }
}

#[async_trait]
impl ProjectStore for SupabaseProjects {
    #[allow(clippy::implicit_return)]
    async fn select_all(&self) -> Result<Vec<ProjectRow>> {
        let res = self
            .client
            .request(Method::GET, &format!("{TABLE}?select=*&order=created_at.desc"))
            .await
            .send()
            .await?;

        let res = check_status(res, "select projects").await?;
        return Ok(res.json::<Vec<ProjectRow>>().await?);
    }

    #[allow(clippy::implicit_return)]
    async fn insert(&self, project: &NewProject) -> Result<ProjectRow> {
        let res = self
            .client
            .request(Method::POST, TABLE)
            .await
            .header("Prefer", "return=representation")
            .json(project)
            .send()
            .await?;

        let res = check_status(res, "insert project").await?;
        return first_row(res.json::<Vec<ProjectRow>>().await?, "insert");
    }

    #[allow(clippy::implicit_return)]
    async fn update(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectRow> {
        let res = self
            .client
            .request(Method::PATCH, &format!("{TABLE}?{}", eq_filter("id", id)))
            .await
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;

        let res = check_status(res, "update project").await?;
        return first_row(res.json::<Vec<ProjectRow>>().await?, "update");
    }

    #[allow(clippy::implicit_return)]
    async fn delete(&self, id: &str) -> Result<()> {
        let res = self
            .client
            .request(Method::DELETE, &format!("{TABLE}?{}", eq_filter("id", id)))
            .await
            .send()
            .await?;

        check_status(res, "delete project").await?;
        return Ok(());
    }
}
