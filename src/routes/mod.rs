//! HTTP routes for Tokentally
//!
//! This module defines all HTTP endpoints exposed by the service.

pub mod health;
pub mod metrics;
pub mod providers;
pub mod tokens;
pub mod tools;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
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

    let counting_routes = Router::new()
        .route("/v1/tokens/count", post(tokens::count_tokens))
        .route("/v1/tools/count_tokens", post(tools::count_tokens_tool))
        .route("/v1/providers", get(providers::list_providers))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes));

    // Public routes (health checks, metrics)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(counting_routes)
        // Global middleware (applied to all routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
