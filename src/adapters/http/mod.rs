//! HTTP adapter - the relay's REST surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::relay_router;
