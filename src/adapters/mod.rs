//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay to external systems:
//! - `engine` - HTTP gateway to the conversational-AI engine
//! - `geocoding` - Nominatim and Google Places facility search
//! - `fhir` - FHIR store client bootstrap
//! - `http` - the relay's own REST surface

pub mod engine;
pub mod fhir;
pub mod geocoding;
pub mod http;

pub use engine::{EngineGatewayConfig, HttpEngineGateway};
pub use fhir::{FhirError, FhirStoreClient};
pub use geocoding::{facility_search_from_config, NominatimSearch};
pub use http::{relay_router, AppState};
