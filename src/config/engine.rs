//! Conversational-AI engine configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the upstream conversational-AI engine.
///
/// All fields map to flat `ENGINE_*` environment variables
/// (`ENGINE_BASE_URL`, `ENGINE_API_KEY`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the engine API
    #[serde(default)]
    pub base_url: String,

    /// Bearer API key
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Model requested on task creation
    #[serde(default = "default_model")]
    pub model: String,

    /// Worker the engine should route sessions to
    pub worker_id: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EngineConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("ENGINE_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidEngineUrl);
        }
        if self.api_key.is_none() {
            return Err(ValidationError::MissingRequired("ENGINE_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            model: default_model(),
            worker_id: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2-5-flash".to_string()
}

fn default_timeout() -> u64 {
    30
}
