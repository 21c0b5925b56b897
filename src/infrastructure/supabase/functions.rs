#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::check_status;
use super::SupabaseClient;
use crate::domain::models::ScreenshotService;
use crate::infrastructure::functions::EnsureAdminReport;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptureResponse {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Server side functions deployed next to the database.
#[derive(Clone, Default)]
pub struct SupabaseFunctions {
    client: SupabaseClient,
}

impl SupabaseFunctions {
    pub fn new(client: SupabaseClient) -> SupabaseFunctions {
        return SupabaseFunctions { client };
    }

    /// Asks the deployed `ensure-admin` function to provision the admin
    /// account. A failure report comes back with an error status, so the
    /// body is read whatever the status is.
    pub async fn ensure_admin(&self) -> Result<EnsureAdminReport> {
        let res = self
            .client
            .request(Method::POST, "functions/v1/ensure-admin")
            .await
            .json(&json!({}))
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        match serde_json::from_str::<EnsureAdminReport>(&body) {
            Ok(report) => return Ok(report),
            Err(err) => {
                tracing::error!(status = status, body = %body, error = ?err, "unexpected ensure-admin response");
                bail!("ensure-admin failed with status {status}");
            }
        }
    }
}

#[async_trait]
impl ScreenshotService for SupabaseFunctions {
    #[allow(clippy::implicit_return)]
    async fn invoke(&self, url: &str) -> Result<String> {
        let res = self
            .client
            .request(Method::POST, "functions/v1/capture-screenshot")
            .await
            .json(&json!({ "url": url }))
            .send()
            .await?;

        let body: CaptureResponse = check_status(res, "capture screenshot").await?.json().await?;
        if let Some(image_url) = body.image_url.filter(|e| return !e.is_empty()) {
            return Ok(image_url);
        }
        if let Some(error) = body.error {
            bail!(error);
        }

        bail!("capture-screenshot returned no imageUrl");
    }
}
