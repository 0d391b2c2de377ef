//! FHIR store configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the external FHIR store.
///
/// Maps to flat `FHIR_*` environment variables (`FHIR_BASE_URL`,
/// `FHIR_ACCESS_TOKEN`, `FHIR_STORE_ID`). All three are required; the
/// process refuses to start without them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FhirConfig {
    /// Base URL of the FHIR store API
    #[serde(default)]
    pub base_url: String,

    /// Access token for the store
    #[serde(default)]
    pub access_token: Option<Secret<String>>,

    /// Identifier of the store to bind the client to
    #[serde(default)]
    pub store_id: String,
}

impl FhirConfig {
    /// Validate FHIR configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("FHIR_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidFhirUrl);
        }
        if self.access_token.is_none() {
            return Err(ValidationError::MissingRequired("FHIR_ACCESS_TOKEN"));
        }
        if self.store_id.is_empty() {
            return Err(ValidationError::MissingRequired("FHIR_STORE_ID"));
        }
        Ok(())
    }
}
