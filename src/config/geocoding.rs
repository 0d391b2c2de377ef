//! Geocoding / places provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the hospital-finder upstream.
///
/// Maps to flat `GEOCODING_*` environment variables. The API key is
/// optional: the open Nominatim strategy needs none, and the commercial
/// strategy fails per request (not at startup) when the key is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingConfig {
    /// Which upstream strategy to use
    #[serde(default)]
    pub provider: GeocodingProvider,

    /// API key, required only by the commercial provider
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent sent to the open geocoding endpoint
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Geocoding provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeocodingProvider {
    #[default]
    Nominatim,
    Google,
}

impl GeocodingConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate geocoding configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            provider: GeocodingProvider::default(),
            api_key: None,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "HealthRelay/0.1".to_string()
}
