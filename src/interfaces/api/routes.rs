//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use super::handlers;
use crate::state::AppState;

/// 16 MiB, the largest request body accepted
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", post(handlers::translate))
        .route("/api/translate-batch", post(handlers::translate_batch))
        .route("/api/speak", post(handlers::speak))
        .route("/api/health", get(handlers::health_check))
        .route("/api/info", get(handlers::info))
        .fallback(handlers::not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
