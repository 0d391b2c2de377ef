use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use health_relay::adapters::{
    facility_search_from_config, relay_router, AppState, EngineGatewayConfig, FhirStoreClient,
    HttpEngineGateway,
};
use health_relay::config::AppConfig;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::io::Error::other(format!("Configuration error: {e}"))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        std::io::Error::other(format!("Configuration error: {e}"))
    })?;

    if !config.geocoding.has_api_key() {
        tracing::warn!(
            "GEOCODING_API_KEY is not set; the commercial places strategy is unavailable"
        );
    }

    // Engine gateway (30s timeout by default)
    let api_key = config
        .engine
        .api_key
        .clone()
        .expect("validated engine api key");
    let engine = Arc::new(HttpEngineGateway::new(
        EngineGatewayConfig::new(config.engine.base_url.clone(), api_key)
            .with_worker_id(config.engine.worker_id.clone())
            .with_timeout(config.engine.timeout()),
    ));

    let facilities = facility_search_from_config(&config.geocoding);

    // FHIR store bootstrap: logged, never blocks route availability.
    let fhir = FhirStoreClient::new(
        config.fhir.base_url.clone(),
        config.fhir.access_token.clone().expect("validated fhir token"),
        config.fhir.store_id.clone(),
    );
    tokio::spawn(async move {
        match fhir.initialize().await {
            Ok(()) => tracing::info!(store_id = fhir.store_id(), "FHIR store client initialized"),
            Err(e) => tracing::error!(error = %e, "Failed to initialize FHIR store client"),
        }
    });

    let state = AppState {
        engine,
        facilities,
        model: config.engine.model.clone(),
    };

    let app = Router::new()
        .merge(relay_router(state))
        .fallback_service(ServeDir::new(&config.server.public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind listener to {addr}: {e}");
        e
    })?;
    tracing::info!("Server running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
