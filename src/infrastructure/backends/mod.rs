pub mod gemini;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CompletionBackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<CompletionBackendBox> {
        if Config::get(ConfigKey::GeminiURL).is_empty() {
            bail!("No completion backend configured, set gemini-url");
        }

        return Ok(Box::<gemini::Gemini>::default());
    }
}
