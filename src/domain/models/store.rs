use anyhow::Result;
use async_trait::async_trait;

use super::AuthSession;
use super::AuthUser;
use super::NewProject;
use super::ProjectPatch;
use super::ProjectRow;

/// Data access for the remote project table. Rows come back raw and are
/// normalized by the repository.
#[async_trait]
pub trait ProjectStore {
    /// Every row, newest `created_at` first.
    async fn select_all(&self) -> Result<Vec<ProjectRow>>;

    async fn insert(&self, project: &NewProject) -> Result<ProjectRow>;

    async fn update(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectRow>;

    async fn delete(&self, id: &str) -> Result<()>;
}

pub type ProjectStoreBox = Box<dyn ProjectStore + Send + Sync>;

/// The hosted identity service. Implementations keep the session token to
/// themselves.
#[async_trait]
pub trait Identity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    async fn sign_out(&self) -> Result<()>;

    async fn session(&self) -> Result<Option<AuthSession>>;

    async fn user(&self) -> Result<Option<AuthUser>>;
}

pub type IdentityBox = Box<dyn Identity + Send + Sync>;

#[async_trait]
pub trait ScreenshotService {
    /// Returns the image URL for an already normalized website URL.
    async fn invoke(&self, url: &str) -> Result<String>;
}

pub type ScreenshotServiceBox = Box<dyn ScreenshotService + Send + Sync>;
