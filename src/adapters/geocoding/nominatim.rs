//! Nominatim Search - open-geocoding implementation of `FacilitySearch`.
//!
//! Searches the OpenStreetMap Nominatim endpoint for "hospital {location}"
//! and keeps only results that look like medical amenities. Requires no
//! API key; Nominatim's usage policy requires a descriptive User-Agent.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::Facility;
use crate::ports::{FacilitySearch, SearchError};

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
const RESULT_LIMIT: u32 = 10;

/// Configuration for the Nominatim search adapter.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Search endpoint URL.
    pub endpoint: String,
    /// User-Agent identifying this service.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl NominatimConfig {
    /// Creates a configuration with the public endpoint.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: user_agent.into(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the search endpoint (for self-hosted instances).
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

/// Facility search backed by Nominatim.
pub struct NominatimSearch {
    config: NominatimConfig,
    client: Client,
}

impl NominatimSearch {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: NominatimConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

/// One raw Nominatim search result.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NominatimPlace {
    #[serde(default)]
    display_name: String,
    #[serde(default, rename = "type")]
    place_type: String,
    #[serde(default, rename = "class")]
    place_class: String,
}

/// Keeps results whose category or name suggests a medical amenity.
pub(crate) fn is_health_facility(place: &NominatimPlace) -> bool {
    let name = place.display_name.to_lowercase();
    let place_type = place.place_type.to_lowercase();

    place.place_class.eq_ignore_ascii_case("amenity")
        || place_type.contains("hospital")
        || place_type.contains("clinic")
        || name.contains("hospital")
        || name.contains("clinic")
        || name.contains("medical")
        || name.contains("health")
}

/// Splits a display name into a short facility name and a two-segment
/// address.
pub(crate) fn to_facility(place: &NominatimPlace) -> Facility {
    let display_name = if place.display_name.is_empty() {
        "Unknown Facility"
    } else {
        place.display_name.as_str()
    };

    let mut segments = display_name.split(',').map(str::trim);
    let name = segments.next().unwrap_or("Unknown Facility").to_string();
    let address_segments: Vec<&str> = segments.take(2).collect();
    let address = if address_segments.is_empty() {
        "Address not available".to_string()
    } else {
        address_segments.join(", ")
    };

    let kind = if place.place_type.is_empty() {
        "healthcare".to_string()
    } else {
        place.place_type.clone()
    };

    Facility::new(name, address).with_kind(kind)
}

#[async_trait]
impl FacilitySearch for NominatimSearch {
    async fn search(&self, location: &str) -> Result<Vec<Facility>, SearchError> {
        let query = format!("hospital {location}");
        let limit = RESULT_LIMIT.to_string();
        tracing::debug!(%location, "searching Nominatim for hospitals");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .header("User-Agent", &self.config.user_agent)
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

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        tracing::debug!(results = places.len(), "Nominatim returned results");

        let facilities = places
            .iter()
            .filter(|p| is_health_facility(p))
            .map(to_facility)
            .collect();

        Ok(facilities)
    }
}
