use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Client sent a malformed or incomplete request
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
    /// The upstream completion call failed
    #[error("OpenAI API error: {0}")]
    Upstream(String),
    /// HTTP transport error (preserves reqwest::Error for inspection)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Category string surfaced in the `error` field of 500 responses.
    pub fn category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Config(_) => "Configuration error",
            Self::Upstream(_) | Self::HttpRequest(_) => "OpenAI API error",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 400s carry only a detail; 500s carry a category plus the detail.
        // Upstream details pass through verbatim.
        match &self {
            Self::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            Self::HttpRequest(err) => error_response(self.category(), err.to_string()),
            Self::Config(detail) | Self::Upstream(detail) | Self::Internal(detail) => {
                error_response(self.category(), detail.clone())
            }
        }
    }
}

fn error_response(category: &str, detail: String) -> Response {
    let body = Json(json!({
        "error": category,
        "detail": detail,
    }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
