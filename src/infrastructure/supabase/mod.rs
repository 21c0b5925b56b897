#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod auth;
pub mod functions;
pub mod projects;

use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Error;
use anyhow::Result;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthSession;

/// A signed in session as the identity service handed it out. The access
/// token never leaves this module.
#[derive(Clone, Debug)]
struct StoredSession {
    access_token: String,
    session: AuthSession,
}

/// Shared HTTP plumbing for the hosted backend: REST tables, identity and
/// functions all sit behind the same base URL and key.
#[derive(Clone)]
pub struct SupabaseClient {
    url: String,
    key: String,
    client: reqwest::Client,
    session: Arc<RwLock<Option<StoredSession>>>,
}

impl Default for SupabaseClient {
    fn default() -> SupabaseClient {
        return SupabaseClient::new(
            &Config::get(ConfigKey::SupabaseURL),
            &Config::get(ConfigKey::SupabaseAnonKey),
        );
    }
}

impl SupabaseClient {
    pub fn new(url: &str, key: &str) -> SupabaseClient {
        return SupabaseClient {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            client: reqwest::Client::new(),
            session: Arc::new(RwLock::new(None)),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{}/{}", self.url, path.trim_start_matches('/'));
    }

    async fn bearer(&self) -> String {
        if let Some(stored) = self.session.read().await.as_ref() {
            return stored.access_token.to_string();
        }

        return self.key.to_string();
    }

    /// Request with the `apikey` header and a bearer token: the session's
    /// access token when signed in, the client key otherwise.
    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        return self
            .client
            .request(method, self.endpoint(path))
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.bearer().await));
    }

    async fn store_session(&self, access_token: &str, session: AuthSession) {
        *self.session.write().await = Some(StoredSession {
            access_token: access_token.to_string(),
            session,
        });
    }

    async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    async fn current_session(&self) -> Option<AuthSession> {
        return self
            .session
            .read()
            .await
            .as_ref()
            .map(|e| return e.session.clone());
    }
}

/// Pulls a readable message out of an error body. The identity service,
/// the REST layer and functions each name the field differently.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    return ["msg", "error_description", "message", "error", "details"]
        .iter()
        .find_map(|key| {
            return value
                .get(*key)
                .and_then(|e| return e.as_str())
                .filter(|e| return !e.is_empty())
                .map(|e| return e.to_string());
        });
}

fn remote_error(status: u16, body: &str) -> Error {
    match error_message(body) {
        Some(message) => return anyhow!(message),
        None => return anyhow!("Request failed with status {status}"),
    }
}

/// Passes successful responses through and turns the rest into errors
/// carrying the remote message.
pub(crate) async fn check_status(res: Response, action: &str) -> Result<Response> {
    let status = res.status().as_u16();
    if res.status().is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    tracing::error!(status = status, body = %body, action = action, "remote request failed");
    return Err(remote_error(status, &body));
}

fn eq_filter(column: &str, value: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
    return format!("{column}=eq.{encoded}");
}
