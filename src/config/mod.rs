use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration file.
///
/// CLI flags cover the basic server settings; the file is the only
/// place the LLM endpoints are configured.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI defaults)
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
    pub jwt_secret: Option<String>,
    pub disable_registration: Option<bool>,

    // Feature configs
    pub llm: Option<LlmConfig>,
    pub fallback_llm: Option<LlmConfig>,
    pub generation: Option<GenerationConfig>,
}

/// One OpenAI-compatible chat completions endpoint.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

impl LlmConfig {
    /// An endpoint is usable once both base URL and model are present.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.model.is_some()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub min_interval_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
