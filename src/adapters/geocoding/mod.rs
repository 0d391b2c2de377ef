//! Geocoding adapters - the two interchangeable `FacilitySearch`
//! implementations. Provider selection happens once at startup from
//! `GEOCODING_PROVIDER`.

mod google_places;
mod nominatim;

pub use google_places::{GooglePlacesConfig, GooglePlacesSearch};
pub use nominatim::{NominatimConfig, NominatimSearch};

use std::sync::Arc;

use crate::config::{GeocodingConfig, GeocodingProvider};
use crate::ports::FacilitySearch;

/// Builds the configured facility-search implementation.
pub fn facility_search_from_config(config: &GeocodingConfig) -> Arc<dyn FacilitySearch> {
    match config.provider {
        GeocodingProvider::Nominatim => Arc::new(NominatimSearch::new(
            NominatimConfig::new(config.user_agent.clone()).with_timeout(config.timeout()),
        )),
        GeocodingProvider::Google => Arc::new(GooglePlacesSearch::new(
            GooglePlacesConfig::new(config.api_key.clone()).with_timeout(config.timeout()),
        )),
    }
}
