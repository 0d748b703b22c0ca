//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use avatar_tint::models::AppConfig;
use avatar_tint::server::{build_router, create_app_state, create_app_state_with_loader, AppState};
use avatar_tint::services::{ColorResolver, ImageLoader};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub resolver: Arc<ColorResolver>,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application from a YAML config snippet
    pub fn with_yaml(yaml: &str) -> Self {
        Self::with_config(AppConfig::from_yaml(yaml).expect("Invalid test config"))
    }

    pub fn with_config(config: AppConfig) -> Self {
        // Create application state using shared server module
        Self::from_state(create_app_state(&config))
    }

    /// Create a test application that loads images through `loader`
    pub fn with_loader(loader: Arc<dyn ImageLoader>) -> Self {
        Self::from_state(create_app_state_with_loader(&AppConfig::default(), loader))
    }

    fn from_state(state: AppState) -> Self {
        // Keep references for test assertions
        let resolver = state.resolver.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self { router, resolver }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST raw bytes as an image body
    pub async fn post_image(&self, path: &str, body: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/octet-stream")
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Make a DELETE request to the given path
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
