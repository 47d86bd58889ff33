//! HTTP routes for the gateway
//!
//! This module defines all HTTP endpoints exposed by the proxy. Paths that
//! match no route fall through to the static front-end bundle, minus hidden
//! files.

pub mod gemini;
pub mod health;
pub mod maps;
pub mod static_files;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/config/mapbox", get(maps::mapbox_config))
        .route("/api/geocode/:location", get(maps::geocode))
        .route("/api/directions/:mode/:coordinates", get(maps::directions))
        .route("/api/gemini", post(gemini::generate_content));

    // Public routes (health checks)
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .fallback_service(static_files::service(&state.config.static_dir))
        // Global middleware (applied to all routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
