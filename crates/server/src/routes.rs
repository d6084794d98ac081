//! Route configuration.

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;

use crate::config::ServerConfig;
use crate::handlers::{health_routes, user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
///
/// Uploaded files are served under `/uploads`; any other unmatched path
/// falls through to the public directory.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let body_limit = match config.body_limit {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .merge(user_routes())
        // Health check
        .nest("/health", health_routes())
        // OpenAPI document
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(body_limit)
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
