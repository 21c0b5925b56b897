//! In-memory stand-ins for the remote collaborators, shared by service tests.

use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde_json::Value;

use crate::domain::models::AuthSession;
use crate::domain::models::AuthUser;
use crate::domain::models::CompletionBackend;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::CompletionReply;
use crate::domain::models::Identity;
use crate::domain::models::NewProject;
use crate::domain::models::ProjectPatch;
use crate::domain::models::ProjectRow;
use crate::domain::models::ProjectStore;
use crate::domain::models::ScreenshotService;

#[derive(Default)]
pub struct MemoryStoreState {
    pub rows: Vec<ProjectRow>,
    pub fail: bool,
    pub selects: usize,
    pub writes: usize,
    pub next_id: usize,
    pub last_patch: Option<ProjectPatch>,
}

/// A project table that orders like the remote one. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub state: Arc<Mutex<MemoryStoreState>>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<ProjectRow>) -> MemoryStore {
        let store = MemoryStore::default();
        store.state.lock().unwrap().rows = rows;
        return store;
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    pub fn selects(&self) -> usize {
        return self.state.lock().unwrap().selects;
    }

    pub fn writes(&self) -> usize {
        return self.state.lock().unwrap().writes;
    }

    pub fn last_patch(&self) -> Option<ProjectPatch> {
        return self.state.lock().unwrap().last_patch.clone();
    }

    pub fn len(&self) -> usize {
        return self.state.lock().unwrap().rows.len();
    }
}

fn row_from_value(value: Value) -> Result<ProjectRow> {
    return Ok(serde_json::from_value(value)?);
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn select_all(&self) -> Result<Vec<ProjectRow>> {
        let mut state = self.state.lock().unwrap();
        state.selects += 1;
        if state.fail {
            bail!("connection refused");
        }

        let mut rows = state.rows.clone();
        rows.sort_by(|a, b| return b.created_at.cmp(&a.created_at));
        return Ok(rows);
    }

    async fn insert(&self, project: &NewProject) -> Result<ProjectRow> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        if state.fail {
            bail!("insert rejected");
        }

        state.next_id += 1;
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::minutes(state.next_id as i64);

        let mut value = serde_json::to_value(project)?;
        value["id"] = Value::String(format!("project-{}", state.next_id));
        value["created_at"] = serde_json::to_value(created_at)?;
        value["updated_at"] = serde_json::to_value(created_at)?;

        let row = row_from_value(value)?;
        state.rows.push(row.clone());
        return Ok(row);
    }

    async fn update(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectRow> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        state.last_patch = Some(patch.clone());
        if state.fail {
            bail!("update rejected");
        }

        let row = match state.rows.iter_mut().find(|e| return e.id == id) {
            Some(row) => row,
            None => bail!("no project {id}"),
        };

        let mut value = serde_json::to_value(&*row)?;
        let changes = serde_json::to_value(patch)?;
        if let (Some(target), Some(source)) = (value.as_object_mut(), changes.as_object()) {
            for (key, val) in source {
                target.insert(key.to_string(), val.clone());
            }
        }

        *row = row_from_value(value)?;
        return Ok(row.clone());
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        if state.fail {
            bail!("delete rejected");
        }

        state.rows.retain(|e| return e.id != id);
        return Ok(());
    }
}

#[derive(Clone, Default)]
pub struct FakeScreenshots {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub reply: Option<String>,
}

impl FakeScreenshots {
    pub fn returning(image_url: &str) -> FakeScreenshots {
        return FakeScreenshots {
            calls: Arc::default(),
            reply: Some(image_url.to_string()),
        };
    }

    pub fn failing() -> FakeScreenshots {
        return FakeScreenshots::default();
    }

    pub fn calls(&self) -> Vec<String> {
        return self.calls.lock().unwrap().clone();
    }
}

#[async_trait]
impl ScreenshotService for FakeScreenshots {
    async fn invoke(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        match &self.reply {
            Some(image_url) => return Ok(image_url.to_string()),
            None => bail!("function returned 500"),
        }
    }
}

#[derive(Default)]
pub struct FakeIdentity {
    pub fail: bool,
    pub session: Mutex<Option<AuthSession>>,
}

impl FakeIdentity {
    pub fn failing() -> FakeIdentity {
        return FakeIdentity {
            fail: true,
            session: Mutex::new(None),
        };
    }

    fn user_for(email: &str) -> AuthUser {
        return AuthUser {
            id: format!("user-{email}"),
            email: Some(email.to_string()),
        };
    }
}

#[async_trait]
impl Identity for FakeIdentity {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthUser> {
        if self.fail {
            bail!("User already registered");
        }

        return Ok(FakeIdentity::user_for(email));
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthSession> {
        if self.fail {
            bail!("Invalid login credentials");
        }

        let session = AuthSession {
            user: FakeIdentity::user_for(email),
            expires_at: None,
        };
        *self.session.lock().unwrap() = Some(session.clone());
        return Ok(session);
    }

    async fn sign_out(&self) -> Result<()> {
        if self.fail {
            bail!("network down");
        }

        *self.session.lock().unwrap() = None;
        return Ok(());
    }

    async fn session(&self) -> Result<Option<AuthSession>> {
        if self.fail {
            bail!("network down");
        }

        return Ok(self.session.lock().unwrap().clone());
    }

    async fn user(&self) -> Result<Option<AuthUser>> {
        let session = self.session().await?;
        return Ok(session.map(|e| return e.user));
    }
}

/// Completion backend answering from a fixed reply. `None` simulates a
/// transport failure.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub reply: Option<CompletionReply>,
    pub prompts: Arc<Mutex<Vec<CompletionPrompt>>>,
}

impl FakeBackend {
    pub fn replying(reply: CompletionReply) -> FakeBackend {
        return FakeBackend {
            reply: Some(reply),
            prompts: Arc::default(),
        };
    }

    pub fn prompts(&self) -> Vec<CompletionPrompt> {
        return self.prompts.lock().unwrap().clone();
    }
}

#[async_trait]
impl CompletionBackend for FakeBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, prompt: CompletionPrompt) -> Result<CompletionReply> {
        self.prompts.lock().unwrap().push(prompt);
        match &self.reply {
            Some(reply) => return Ok(reply.clone()),
            None => bail!("error sending request"),
        }
    }
}
