#[cfg(test)]
#[path = "placeholder_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::models::ScreenshotService;

pub fn placeholder_screenshot_url(url: &str, timestamp_ms: i64) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    return format!(
        "https://via.placeholder.com/1200x630/333333/FFFFFF?text=Screenshot+of+{encoded}+{timestamp_ms}"
    );
}

/// Local stand-in for the hosted capture function, used when running
/// offline. Produces a labelled placeholder image instead of a capture.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderScreenshots {}

#[async_trait]
impl ScreenshotService for PlaceholderScreenshots {
    #[allow(clippy::implicit_return)]
    async fn invoke(&self, url: &str) -> Result<String> {
        if url.is_empty() {
            bail!("URL is required");
        }

        return Ok(placeholder_screenshot_url(
            url,
            Utc::now().timestamp_millis(),
        ));
    }
}
