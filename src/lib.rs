//! Health Relay - HTTP relay for a conversational health assistant.
//!
//! Wraps three external services behind a small JSON surface: an AI
//! engine's session/task API, a FHIR store bootstrap, and a
//! geocoding-backed hospital finder.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
