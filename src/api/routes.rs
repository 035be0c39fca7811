//! API Routes
//!
//! Configures the Axum router with all verification server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    accumulator_handler, audit_handler, cache_detail_handler, create_cache_handler,
    health_handler, list_caches_handler, quiz_handler, register_handler, stats_handler,
    submit_answer_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /users` - Register a user
/// - `GET /caches` - List caches
/// - `POST /caches` - Create a cache with its questions
/// - `GET /caches/:id` - Cache detail
/// - `GET /caches/:id/quiz` - Random quiz question
/// - `POST /caches/:id/answers` - Submit an answer
/// - `GET /caches/:id/accumulator` - Current accumulator
/// - `GET /caches/:id/audit` - Replay and compare the accumulator
/// - `GET /stats` - Verification statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", post(register_handler))
        .route("/caches", get(list_caches_handler).post(create_cache_handler))
        .route("/caches/:id", get(cache_detail_handler))
        .route("/caches/:id/quiz", get(quiz_handler))
        .route("/caches/:id/answers", post(submit_answer_handler))
        .route("/caches/:id/accumulator", get(accumulator_handler))
        .route("/caches/:id/audit", get(audit_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
