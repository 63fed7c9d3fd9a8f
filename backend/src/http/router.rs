//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and
//! returns the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS; the API is read-mostly and served behind a gateway.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Analytics
        .route("/posts/{post_pda}/vote-trends", get(handlers::get_vote_trends))
        .route("/vote-trends", post(handlers::get_vote_trends_batch))
        .route("/users/{user_pda}/stats/{kind}", get(handlers::get_daily_stats))
        // Ingestion
        .route("/comments", post(handlers::store_comment))
        .route("/reactions", post(handlers::store_reaction))
        .route("/rewards", post(handlers::store_reward));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
