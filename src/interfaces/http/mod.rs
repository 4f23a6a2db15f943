//! REST API router configuration.
//!
//! Route definitions and server startup. Handlers live in [`handlers`].

pub mod handlers;

use crate::domain::error::DashError;
use crate::infrastructure::config::ServerConfig;
use crate::state::AppState;
use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the REST API router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server);
    let api = "/api";

    Router::new()
        .route(&format!("{api}/health"), get(handlers::health))
        .route(&format!("{api}/players/search"), get(handlers::search))
        .route(&format!("{api}/players/lookup"), get(handlers::lookup))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ORIGIN, ACCEPT, CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    if config.cors_allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the REST server and run until `shutdown` resolves.
pub async fn start<F>(state: AppState, shutdown: F) -> Result<(), DashError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_addr = state.config.bind_addr();
    let app = build_router(state);

    info!("Starting REST server on {}", &bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
