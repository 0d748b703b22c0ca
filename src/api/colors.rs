use axum::{
    body::Bytes,
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use swatch_theme::{Boosts, CategoryToken};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::ImageSource;
use crate::services::ColorResolver;

/// Query parameters for color resolution
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ColorQuery {
    /// Category for the category color ("Vibrant", "DarkMuted", ..., or "disabled")
    pub category: Option<String>,
    /// Saturation boost, 0-10
    pub sat_boost: Option<u8>,
    /// Lightness boost, 0-10
    pub light_boost: Option<u8>,
    /// Cache identity for the image; defaults to a hash of the body
    pub id: Option<String>,
}

impl ColorQuery {
    fn boosts(&self, default: Boosts) -> Result<Boosts, ApiError> {
        let check = |name: &str, value: Option<u8>, fallback: u8| match value {
            Some(v) if v > Boosts::MAX => Err(ApiError::BadRequest(format!(
                "{name} must be 0-{}",
                Boosts::MAX
            ))),
            Some(v) => Ok(v),
            None => Ok(fallback),
        };
        Ok(Boosts::new(
            check("sat_boost", self.sat_boost, default.saturation)?,
            check("light_boost", self.light_boost, default.lightness)?,
        ))
    }
}

/// Resolved colors for one image
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ColorResponse {
    /// Cache identity of the image
    pub id: String,
    /// Best readable color as hex, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "#f0a060")]
    pub best: Option<String>,
    /// Requested category token, as understood by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Readable color for the requested category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
    /// Raw extracted swatches by category name
    pub palette: BTreeMap<String, String>,
}

/// Resolve theme colors for an avatar image
///
/// The request body is the encoded image (PNG, JPEG, GIF, WebP or BMP).
/// Undecodable images are not an error: they resolve to the default color.
#[utoipa::path(
    post,
    path = "/api/colors",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    params(ColorQuery),
    responses(
        (status = 200, description = "Colors resolved", body = ColorResponse),
        (status = 400, description = "Empty body or boost out of range"),
    ),
    tag = "Colors"
)]
pub async fn handle_colors(
    State(resolver): State<Arc<ColorResolver>>,
    Query(query): Query<ColorQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    let boosts = query.boosts(resolver.default_boosts())?;

    let source = match &query.id {
        Some(id) if !id.is_empty() => ImageSource::with_id(id.as_str(), body.as_ref()),
        _ => ImageSource::from_bytes(body.as_ref()),
    };

    tracing::info!(
        image = %source.identity(),
        bytes = body.len(),
        category = ?query.category,
        sat_boost = boosts.saturation,
        light_boost = boosts.lightness,
        "Color request received"
    );

    let token = query.category.as_deref().map(CategoryToken::parse_lenient);
    let resolved = resolver.resolve_colors(&source, token, boosts).await;
    let palette = resolved
        .palette
        .iter()
        .map(|(category, swatch)| (category.name().to_string(), swatch.color.to_hex()))
        .collect();

    Ok(Json(ColorResponse {
        id: source.identity(),
        best: resolved.best.map(|c| c.to_hex()),
        category: token.map(|t| t.to_string()),
        category_color: resolved.category.map(|c| c.to_hex()),
        palette,
    }))
}
