use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Empty image body")]
    EmptyBody,
}

/// Failure to turn an image source into RGBA pixels.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image too large: {width}x{height} (max {max} pixels)")]
    TooLarge { width: u32, height: u32, max: u64 },

    #[error("Load task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::EmptyBody => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("sat_boost must be 0-10".to_string());
        assert_eq!(error.to_string(), "Bad request: sat_boost must be 0-10");
    }

    #[test]
    fn test_api_error_empty_body() {
        assert_eq!(ApiError::EmptyBody.to_string(), "Empty image body");
    }

    #[test]
    fn test_load_error_too_large() {
        let error = LoadError::TooLarge {
            width: 20000,
            height: 20000,
            max: 100_000_000,
        };
        assert_eq!(
            error.to_string(),
            "Image too large: 20000x20000 (max 100000000 pixels)"
        );
    }

    #[test]
    fn test_load_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let error: LoadError = io.into();
        match error {
            LoadError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_config_error_invalid() {
        let error = ConfigError::invalid("cache.capacity", "must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid config value for cache.capacity: must be at least 1"
        );
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        use axum::response::IntoResponse;

        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::EmptyBody.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
