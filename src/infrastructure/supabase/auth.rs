#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;

use super::check_status;
use super::SupabaseClient;
use crate::domain::models::AuthSession;
use crate::domain::models::AuthUser;
use crate::domain::models::Identity;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn expiry(&self) -> Option<DateTime<Utc>> {
        if let Some(expires_at) = self.expires_at {
            return Utc.timestamp_opt(expires_at, 0).single();
        }

        return self
            .expires_in
            .map(|e| return Utc::now() + Duration::seconds(e));
    }
}

/// Password accounts against the hosted identity service. A successful
/// sign in keeps the session in the shared client so later requests are
/// made as the signed in user.
#[derive(Clone, Default)]
pub struct SupabaseIdentity {
    client: SupabaseClient,
}

impl SupabaseIdentity {
    pub fn new(client: SupabaseClient) -> SupabaseIdentity {
        return SupabaseIdentity { client };
    }

    async fn keep_session(&self, token: TokenResponse) -> AuthSession {
        let session = AuthSession {
            expires_at: token.expiry(),
            user: token.user.clone(),
        };

        self.client
            .store_session(&token.access_token, session.clone())
            .await;
        return session;
    }
}

#[async_trait]
impl Identity for SupabaseIdentity {
    /// With email confirmation on the service answers with the bare user,
    /// otherwise with a ready session.
    #[allow(clippy::implicit_return)]
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser> {
        let res = self
            .client
            .request(Method::POST, "auth/v1/signup")
            .await
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: Value = check_status(res, "sign up").await?.json().await?;
        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body)?;
            let session = self.keep_session(token).await;
            return Ok(session.user);
        }

        let user_value = body.get("user").cloned().unwrap_or(body);
        let user: AuthUser = serde_json::from_value(user_value)?;

        tracing::debug!(user = %user.id, "signed up");
        return Ok(user);
    }

    #[allow(clippy::implicit_return)]
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let res = self
            .client
            .request(Method::POST, "auth/v1/token?grant_type=password")
            .await
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = check_status(res, "sign in").await?.json().await?;
        let session = self.keep_session(token).await;
        tracing::debug!(user = %session.user.id, "signed in");
        return Ok(session);
    }

    /// The local session is dropped even when the remote call fails.
    #[allow(clippy::implicit_return)]
    async fn sign_out(&self) -> Result<()> {
        if self.client.current_session().await.is_none() {
            return Ok(());
        }

        let req = self.client.request(Method::POST, "auth/v1/logout").await;
        self.client.clear_session().await;

        let res = req.send().await?;
        check_status(res, "sign out").await?;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn session(&self) -> Result<Option<AuthSession>> {
        let session = match self.client.current_session().await {
            Some(session) => session,
            None => return Ok(None),
        };

        if let Some(expires_at) = session.expires_at {
            if expires_at <= Utc::now() {
                tracing::debug!("session expired");
                self.client.clear_session().await;
                return Ok(None);
            }
        }

        return Ok(Some(session));
    }

    #[allow(clippy::implicit_return)]
    async fn user(&self) -> Result<Option<AuthUser>> {
        if self.session().await?.is_none() {
            return Ok(None);
        }

        let res = self
            .client
            .request(Method::GET, "auth/v1/user")
            .await
            .send()
            .await?;

        let user: AuthUser = check_status(res, "get user").await?.json().await?;
        return Ok(Some(user));
    }
}
