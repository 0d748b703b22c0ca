//! Integration tests for POST /api/colors.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use swatch_theme::{Boosts, ContrastNormalizer, Hsl, Rgb, DEFAULT_COLOR};

use avatar_tint::error::LoadError;
use avatar_tint::models::ImageSource;
use avatar_tint::services::{DecodedImage, FsImageLoader, ImageLoader};
use common::fixtures::{self, GRAY, RED, TRANSPARENT};
use common::{assert_json_error, assert_ok, assert_readable, hex_field, TestApp};

fn normalized(rgb: Rgb, boosts: Boosts) -> Rgb {
    ContrastNormalizer::default().normalize(rgb, boosts)
}

#[tokio::test]
async fn test_best_color_for_solid_image() {
    let app = TestApp::new();
    let response = app
        .post_image("/api/colors", fixtures::solid_png(16, 16, RED))
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    let best = hex_field(&json, "best");
    assert_eq!(best, normalized(Rgb::new(200, 30, 30), Boosts::default()));
    assert_readable(best);
    assert_eq!(json["palette"]["Vibrant"], "#c81e1e");
    assert!(json.get("category").is_none());
    assert!(json.get("category_color").is_none());
}

#[tokio::test]
async fn test_identity_defaults_to_content_hash() {
    let app = TestApp::new();
    let body = fixtures::solid_png(4, 4, RED);

    let first: serde_json::Value = app.post_image("/api/colors", body.clone()).await.json();
    let second: serde_json::Value = app.post_image("/api/colors", body).await.json();
    assert_eq!(first["id"].as_str().map(str::len), Some(32));
    assert_eq!(first["id"], second["id"]);

    let named: serde_json::Value = app
        .post_image("/api/colors?id=alice", fixtures::solid_png(4, 4, RED))
        .await
        .json();
    assert_eq!(named["id"], "alice");
}

#[tokio::test]
async fn test_category_color_falls_back_to_vibrant() {
    let app = TestApp::new();
    let response = app
        .post_image(
            "/api/colors?category=LightMuted",
            fixtures::solid_png(16, 16, RED),
        )
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["category"], "LightMuted");
    assert_eq!(hex_field(&json, "category_color"), hex_field(&json, "best"));
}

#[tokio::test]
async fn test_disabled_category_has_no_color() {
    let app = TestApp::new();
    let response = app
        .post_image(
            "/api/colors?category=disabled",
            fixtures::solid_png(16, 16, RED),
        )
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["category"], "disabled");
    assert!(json.get("category_color").is_none());
    assert!(json["best"].is_string());
}

#[tokio::test]
async fn test_unknown_category_means_vibrant() {
    let app = TestApp::new();
    let json: serde_json::Value = app
        .post_image(
            "/api/colors?category=Sparkly",
            fixtures::solid_png(16, 16, RED),
        )
        .await
        .json();
    assert_eq!(json["category"], "Vibrant");
}

#[tokio::test]
async fn test_transparent_image_gets_default_color() {
    let app = TestApp::new();
    let response = app
        .post_image("/api/colors", fixtures::solid_png(8, 8, TRANSPARENT))
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(
        hex_field(&json, "best"),
        normalized(DEFAULT_COLOR, Boosts::default())
    );
    assert_eq!(json["palette"], serde_json::json!({}));
}

#[tokio::test]
async fn test_undecodable_body_degrades_to_default() {
    let app = TestApp::new();
    let response = app
        .post_image("/api/colors", b"not an image at all".to_vec())
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(
        hex_field(&json, "best"),
        normalized(DEFAULT_COLOR, Boosts::default())
    );
}

/// Filesystem/bytes loader that counts how often it is asked to decode.
#[derive(Default)]
struct CountingLoader {
    inner: FsImageLoader,
    loads: AtomicUsize,
}

#[async_trait]
impl ImageLoader for CountingLoader {
    async fn load(&self, source: &ImageSource) -> Result<DecodedImage, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(source).await
    }
}

#[tokio::test]
async fn test_undecodable_body_is_decoded_once() {
    let loader = Arc::new(CountingLoader::default());
    let app = TestApp::with_loader(loader.clone());

    let response = app
        .post_image("/api/colors?category=DarkMuted", b"garbage".to_vec())
        .await;

    assert_ok(&response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["palette"], serde_json::json!({}));
    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_body_rejected() {
    let app = TestApp::new();
    let response = app.post_image("/api/colors", Vec::new()).await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_boost_out_of_range_rejected() {
    let app = TestApp::new();
    let response = app
        .post_image("/api/colors?sat_boost=11", fixtures::solid_png(4, 4, RED))
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_boosts_raise_lightness() {
    let app = TestApp::new();
    let plain: serde_json::Value = app
        .post_image("/api/colors", fixtures::solid_png(16, 16, RED))
        .await
        .json();
    let boosted: serde_json::Value = app
        .post_image(
            "/api/colors?light_boost=10",
            fixtures::solid_png(16, 16, RED),
        )
        .await
        .json();

    let plain = Hsl::from(hex_field(&plain, "best"));
    let boosted = Hsl::from(hex_field(&boosted, "best"));
    assert!(boosted.l > plain.l, "{boosted:?} vs {plain:?}");
}

#[tokio::test]
async fn test_config_boosts_are_the_default() {
    let app = TestApp::with_yaml("boosts:\n  lightness: 5\n");
    let json: serde_json::Value = app
        .post_image("/api/colors", fixtures::solid_png(16, 16, RED))
        .await
        .json();
    assert_eq!(
        hex_field(&json, "best"),
        normalized(Rgb::new(200, 30, 30), Boosts::new(0, 5))
    );
}

#[tokio::test]
async fn test_configured_priority_is_used() {
    let body = fixtures::split_png(16, 16, RED, GRAY);

    let default_app = TestApp::new();
    let json: serde_json::Value = default_app.post_image("/api/colors", body.clone()).await.json();
    assert_eq!(
        hex_field(&json, "best"),
        normalized(Rgb::new(200, 30, 30), Boosts::default())
    );

    let muted_first = TestApp::with_yaml("selection:\n  priority: [Muted]\n");
    let json: serde_json::Value = muted_first.post_image("/api/colors", body).await.json();
    assert_eq!(
        hex_field(&json, "best"),
        normalized(Rgb::new(120, 120, 120), Boosts::default())
    );
}
