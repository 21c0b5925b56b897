#[cfg(test)]
#[path = "ensure_admin_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::infrastructure::supabase::check_status;
use crate::infrastructure::supabase::SupabaseClient;

/// Outcome of an admin account check, in the shape the hosted function
/// answers with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsureAdminReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl EnsureAdminReport {
    pub fn completed() -> EnsureAdminReport {
        return EnsureAdminReport {
            success: true,
            message: Some("Admin account check completed".to_string()),
            ..Default::default()
        };
    }

    pub fn failed(details: &str) -> EnsureAdminReport {
        return EnsureAdminReport {
            success: false,
            error: Some("Failed to ensure admin user exists".to_string()),
            details: Some(details.to_string()),
            ..Default::default()
        };
    }
}

#[derive(Debug, Deserialize)]
struct AdminUser {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdminUserList {
    #[serde(default)]
    users: Vec<AdminUser>,
}

/// Makes sure the admin account exists, talking to the identity admin API
/// with the service role key.
pub struct AdminProvisioner {
    client: SupabaseClient,
    service_key: String,
    email: String,
    password: String,
}

impl Default for AdminProvisioner {
    fn default() -> AdminProvisioner {
        return AdminProvisioner::new(
            &Config::get(ConfigKey::SupabaseURL),
            &Config::get(ConfigKey::SupabaseServiceKey),
            &Config::get(ConfigKey::AdminEmail),
            &Config::get(ConfigKey::AdminPassword),
        );
    }
}

impl AdminProvisioner {
    pub fn new(url: &str, service_key: &str, email: &str, password: &str) -> AdminProvisioner {
        return AdminProvisioner {
            client: SupabaseClient::new(url, service_key),
            service_key: service_key.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
    }

    pub async fn ensure(&self) -> EnsureAdminReport {
        match self.try_ensure().await {
            Ok(created) => {
                if created {
                    tracing::info!(email = %self.email, "admin user created");
                } else {
                    tracing::info!(email = %self.email, "admin user already exists");
                }
                return EnsureAdminReport::completed();
            }
            Err(err) => {
                tracing::error!(error = ?err, "error ensuring admin user");
                return EnsureAdminReport::failed(&err.to_string());
            }
        }
    }

    /// Returns whether the account had to be created.
    async fn try_ensure(&self) -> Result<bool> {
        if self.service_key.is_empty() {
            bail!("Supabase service key is not defined");
        }

        let res = self
            .client
            .request(Method::GET, "auth/v1/admin/users")
            .await
            .send()
            .await?;
        let list: AdminUserList = check_status(res, "list users")
            .await?
            .json()
            .await?;

        let exists = list
            .users
            .iter()
            .any(|e| return e.email.as_deref() == Some(self.email.as_str()));
        if exists {
            return Ok(false);
        }

        let res = self
            .client
            .request(Method::POST, "auth/v1/admin/users")
            .await
            .json(&json!({
                "email": self.email,
                "password": self.password,
                "email_confirm": true
            }))
            .send()
            .await?;
        check_status(res, "create user").await?;

        return Ok(true);
    }
}
