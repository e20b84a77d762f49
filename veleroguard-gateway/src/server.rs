//! Router assembly and serving

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::routes;
use crate::state::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // System
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        // Sensors
        .route("/sensors/ingest", post(routes::ingest))
        .route("/sensors/windows", get(routes::windows))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Builds the detector and serves until Ctrl-C
pub async fn run(config: GatewayConfig) -> GatewayResult<()> {
    let detector_config = config.detector_config()?;
    let addr = config.socket_addr()?;

    tracing::info!(
        window_capacity = detector_config.window_capacity,
        warmup_samples = detector_config.warmup_samples,
        z_threshold = detector_config.z_threshold,
        "detector configured"
    );

    let app = create_router(AppState::with_config(detector_config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| GatewayError::Bind { addr, source })?;

    tracing::info!("veleroguard v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
