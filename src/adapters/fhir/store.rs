//! FHIR Store Client - startup bootstrap against the external health-data
//! store.
//!
//! The relay binds a client to the configured store at process start.
//! No route currently uses it; the handle exists so the engine's data-store
//! tools have a backing client, and initialization is logged but never
//! blocks the HTTP surface.

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Client bound to one FHIR store.
pub struct FhirStoreClient {
    client: Client,
    base_url: String,
    access_token: Secret<String>,
    store_id: String,
}

/// FHIR bootstrap failures.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("network error: {0}")]
    Network(String),

    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl FhirStoreClient {
    /// Creates a client for the given store.
    pub fn new(
        base_url: impl Into<String>,
        access_token: Secret<String>,
        store_id: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            access_token,
            store_id: store_id.into(),
        }
    }

    /// The store this client is bound to.
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Verifies the store is reachable with the configured credentials.
    pub async fn initialize(&self) -> Result<(), FhirError> {
        let url = format!(
            "{}/stores/{}",
            self.base_url.trim_end_matches('/'),
            self.store_id
        );

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.access_token.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| FhirError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FhirError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}
