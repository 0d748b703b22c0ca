use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::ColorResolver;

/// Result of a cache invalidation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvalidateResponse {
    /// Key prefix that was invalidated; empty for a full clear
    pub prefix: String,
    /// Number of cached palettes and colors removed
    pub removed: usize,
}

/// Invalidate cached entries by key prefix
///
/// Keys start with the image identity followed by `|`, so passing
/// `"<id>|"` drops one image and passing a directory path drops every image
/// under it. Percent-encode slashes.
#[utoipa::path(
    delete,
    path = "/api/cache/{prefix}",
    params(("prefix" = String, Path, description = "Cache key prefix")),
    responses(
        (status = 200, description = "Entries removed", body = InvalidateResponse),
    ),
    tag = "Cache"
)]
pub async fn handle_invalidate(
    State(resolver): State<Arc<ColorResolver>>,
    Path(prefix): Path<String>,
) -> impl IntoResponse {
    let removed = resolver.invalidate_prefix(&prefix);
    Json(InvalidateResponse { prefix, removed })
}

/// Clear both caches
#[utoipa::path(
    delete,
    path = "/api/cache",
    responses(
        (status = 200, description = "Caches cleared", body = InvalidateResponse),
    ),
    tag = "Cache"
)]
pub async fn handle_clear(State(resolver): State<Arc<ColorResolver>>) -> impl IntoResponse {
    let removed = resolver.invalidate_prefix("");
    Json(InvalidateResponse {
        prefix: String::new(),
        removed,
    })
}
