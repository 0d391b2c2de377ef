//! FHIR adapter - store client bootstrapped once at startup.

mod store;

pub use store::{FhirError, FhirStoreClient};
