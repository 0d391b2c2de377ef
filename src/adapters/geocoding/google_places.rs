//! Google Places Search - commercial places implementation of
//! `FacilitySearch`.
//!
//! Runs a text search for "hospitals near {location}" and maps name,
//! formatted address and rating directly. Fails with `MissingApiKey` when
//! no key is configured; the handler turns that into a configuration-error
//! response.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::Facility;
use crate::ports::{FacilitySearch, SearchError};

const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

/// Configuration for the Google Places adapter.
#[derive(Debug, Clone)]
pub struct GooglePlacesConfig {
    /// API key; absent means every search fails closed.
    api_key: Option<Secret<String>>,
    /// Text-search endpoint URL.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GooglePlacesConfig {
    /// Creates a configuration with the public endpoint.
    pub fn new(api_key: Option<Secret<String>>) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the text-search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Facility search backed by the Google Places text search.
pub struct GooglePlacesSearch {
    config: GooglePlacesConfig,
    client: Client,
}

impl GooglePlacesSearch {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: GooglePlacesConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlaceResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    rating: Option<f64>,
}

pub(crate) fn to_facility(place: &PlaceResult) -> Facility {
    let mut facility = Facility::new(place.name.clone(), place.formatted_address.clone());
    if let Some(rating) = place.rating {
        facility = facility.with_rating(rating);
    }
    facility
}

#[async_trait]
impl FacilitySearch for GooglePlacesSearch {
    async fn search(&self, location: &str) -> Result<Vec<Facility>, SearchError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(SearchError::MissingApiKey)?;

        let query = format!("hospitals near {location}");
        tracing::debug!(%location, "searching Google Places for hospitals");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("query", query.as_str()),
                ("key", api_key.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: PlacesResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        tracing::debug!(results = body.results.len(), "Places returned results");

        Ok(body.results.iter().map(to_facility).collect())
    }
}
