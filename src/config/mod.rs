//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Each section reads its own flat prefix
//! (`ENGINE_*`, `FHIR_*`, `GEOCODING_*`); server settings use the bare
//! `PORT` / `HOST` variables.
//!
//! # Example
//!
//! ```no_run
//! use health_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod engine;
mod error;
mod fhir;
mod geocoding;
mod server;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use fhir::FhirConfig;
pub use geocoding::{GeocodingConfig, GeocodingProvider};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, static files)
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversational-AI engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// FHIR store configuration
    #[serde(default)]
    pub fhir: FhirConfig,

    /// Geocoding / places provider configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads each section from its flat environment prefix
    ///    (`ENGINE_BASE_URL` -> `engine.base_url`, `FHIR_STORE_ID` ->
    ///    `fhir.store_id`, ...)
    /// 3. Reads server settings from unprefixed `PORT` / `HOST`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing required values surface through [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let server = Self::section::<ServerConfig>(None)?;
        let engine = Self::section::<EngineConfig>(Some("ENGINE"))?;
        let fhir = Self::section::<FhirConfig>(Some("FHIR"))?;
        let geocoding = Self::section::<GeocodingConfig>(Some("GEOCODING"))?;

        Ok(Self {
            server,
            engine,
            fhir,
            geocoding,
        })
    }

    fn section<T: for<'de> Deserialize<'de>>(prefix: Option<&str>) -> Result<T, ConfigError> {
        let mut source = config::Environment::default().try_parsing(true);
        if let Some(prefix) = prefix {
            source = source.prefix(prefix);
        }
        let section = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(section)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid or
    /// a required variable is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.engine.validate()?;
        self.fhir.validate()?;
        self.geocoding.validate()?;
        Ok(())
    }
}
