pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use claimlens_core::ResourceClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(client: Arc<dyn ResourceClient>) -> Router {
    let app_state = state::AppState::new(client);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::index))
        .route("/health", get(routes::health::health))
        .route("/orchestrate", post(routes::orchestrate::orchestrate))
        .route("/plan", get(routes::orchestrate::plan))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the service on a pre-bound listener.
///
/// Lets the caller read the actual port first (useful with port 0).
/// `client` may block; handlers only call it from blocking tasks.
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    client: Arc<dyn ResourceClient>,
) -> anyhow::Result<()> {
    let local = listener.local_addr()?;
    let app = build_router(client);

    tracing::info!("claimlens orchestrator listening on http://{local}");

    axum::serve(listener, app).await?;
    Ok(())
}
