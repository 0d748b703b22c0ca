//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{ColorResolver, ImageLoader};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ColorResolver>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: &AppConfig) -> AppState {
    AppState {
        resolver: Arc::new(ColorResolver::from_config(config)),
    }
}

/// Create application state with a custom image loader.
pub fn create_app_state_with_loader(config: &AppConfig, loader: Arc<dyn ImageLoader>) -> AppState {
    let resolver = ColorResolver::new(
        config.pipeline(),
        config.selector(),
        loader,
        config.cache.capacity,
    )
    .with_default_boosts(config.boosts);
    AppState {
        resolver: Arc::new(resolver),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/colors", post(handle_colors))
        .route("/api/cache", delete(handle_clear))
        .route("/api/cache/:prefix", delete(handle_invalidate))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_colors(
    State(state): State<AppState>,
    query: axum::extract::Query<api::ColorQuery>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    use axum::response::IntoResponse;

    api::handle_colors(State(state.resolver), query, body)
        .await
        .map(IntoResponse::into_response)
}

async fn handle_invalidate(
    State(state): State<AppState>,
    path: axum::extract::Path<String>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    api::handle_invalidate(State(state.resolver), path)
        .await
        .into_response()
}

async fn handle_clear(State(state): State<AppState>) -> axum::response::Response {
    use axum::response::IntoResponse;

    api::handle_clear(State(state.resolver)).await.into_response()
}
