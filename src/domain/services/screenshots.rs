#[cfg(test)]
#[path = "screenshots_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::ScreenshotServiceBox;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Prepends `https://` unless the URL already carries an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    return format!("https://{url}");
}

pub struct ScreenshotCapture {
    service: ScreenshotServiceBox,
}

impl ScreenshotCapture {
    pub fn new(service: ScreenshotServiceBox) -> ScreenshotCapture {
        return ScreenshotCapture { service };
    }

    pub async fn try_capture(&self, url: &str) -> Result<String> {
        return self.service.invoke(&normalize_url(url)).await;
    }

    /// Image URL for the site, or the placeholder image when anything goes
    /// wrong along the way.
    pub async fn capture(&self, url: &str) -> String {
        match self.try_capture(url).await {
            Ok(image_url) => return image_url,
            Err(err) => {
                tracing::error!(error = ?err, url = url, "screenshot capture failed");
                return PLACEHOLDER_IMAGE.to_string();
            }
        }
    }
}
