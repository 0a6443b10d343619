use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

/// Landing endpoint
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the ChatBot API" }))
}

/// No icon is bundled; browsers probing for one get a 404 with an empty
/// JSON body.
pub async fn favicon() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "chatbot-gateway",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
