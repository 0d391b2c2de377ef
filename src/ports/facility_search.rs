//! Facility Search Port - Interface for the hospital-finder upstream.
//!
//! One capability interface over both observed geocoding strategies
//! (open Nominatim search and commercial places text search). Provider
//! selection is a configuration choice; handlers never branch on it.

use async_trait::async_trait;

use crate::domain::Facility;

/// Port for looking up healthcare facilities near a free-text location.
#[async_trait]
pub trait FacilitySearch: Send + Sync {
    /// Search for facilities near `location`.
    ///
    /// Implementations may return more than the relay's response cap; the
    /// HTTP handler truncates to 3.
    async fn search(&self, location: &str) -> Result<Vec<Facility>, SearchError>;
}

/// Facility search failures.
///
/// These never surface as HTTP errors (except `MissingApiKey`): the
/// hospital-finder endpoint maps them to friendly payloads to keep the
/// conversation flowing.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Request exceeded the configured timeout.
    #[error("search request timed out")]
    Timeout,

    /// Upstream returned HTTP 429.
    #[error("search rate limited")]
    RateLimited,

    /// The commercial strategy has no API key configured.
    #[error("no places API key configured")]
    MissingApiKey,

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Upstream returned any other error status.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },
}
