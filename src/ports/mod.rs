//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the relay and its upstreams. Adapters implement these ports.
//!
//! - `EngineGateway` - session/task calls against the conversational-AI engine
//! - `FacilitySearch` - hospital lookup via a geocoding/places provider

mod engine;
mod facility_search;

pub use engine::{EngineError, EngineErrorKind, EngineGateway, TaskRequest};
pub use facility_search::{FacilitySearch, SearchError};
