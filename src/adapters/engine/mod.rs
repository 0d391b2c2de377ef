//! Engine adapter - HTTP implementation of the `EngineGateway` port.

mod http_client;

pub use http_client::{EngineGatewayConfig, HttpEngineGateway};
