use crate::{
    config::Config,
    error::AppError,
    models::{
        chat::{ChatRequest, ChatResponse},
        openai::{ChatCompletionRequest, ChatMessage},
    },
    providers,
};
use axum::{body::Bytes, extract::State, Json};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// System instruction prepended to every exchange.
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
}

/// Handle `POST /chat`: one stateless message-in, completion-out transaction.
pub async fn handle_chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let start = Instant::now();
    tracing::debug!(body = %String::from_utf8_lossy(&body), "Received chat request");

    let request = parse_chat_request(&body)?;

    // Validate configuration before touching the network.
    let provider_config = state.config.provider.resolve()?;

    let completion_request = ChatCompletionRequest {
        model: provider_config.deployment.clone(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(request.message),
        ],
        max_tokens: Some(provider_config.max_tokens),
        temperature: None,
    };

    let completion = providers::azure_openai::chat_completions(
        &state.http_client,
        &provider_config,
        &completion_request,
    )
    .await;

    let completion = match completion {
        Ok(completion) => completion,
        Err(err) => {
            if let AppError::Upstream(detail) = &err {
                if providers::azure_openai::is_model_not_found(detail) {
                    log_available_deployments(&state, &provider_config).await;
                }
            }
            tracing::error!(error = %err, "Chat completion failed");
            return Err(err);
        }
    };

    let text = completion
        .first_content()
        .ok_or_else(|| AppError::Upstream("completion contained no message content".to_string()))?
        .to_string();

    tracing::info!(
        deployment = %provider_config.deployment,
        duration_ms = start.elapsed().as_millis(),
        "Chat completion successful"
    );

    Ok(Json(ChatResponse { response: text }))
}

/// Handle `OPTIONS /chat` (CORS preflight accommodation): always an empty
/// JSON body, independent of configuration state.
pub async fn handle_chat_options() -> Json<serde_json::Value> {
    Json(json!({}))
}

/// Parse the raw body into a chat request.
///
/// Parsing is manual so malformed input maps to the documented 400 payloads
/// instead of the framework's default rejection shape. An empty message is
/// accepted and forwarded as-is.
fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, AppError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest("Invalid JSON".to_string()))?;

    let message = match value.get("message") {
        None => {
            return Err(AppError::BadRequest(
                "Message field is required".to_string(),
            ))
        }
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(_) => {
            return Err(AppError::BadRequest(
                "Message field must be a string".to_string(),
            ))
        }
    };

    Ok(ChatRequest { message })
}

/// Best-effort diagnostic when the deployment is unknown: log which
/// deployments the resource actually exposes. Never alters the response.
async fn log_available_deployments(
    state: &AppState,
    config: &crate::config::ResolvedAzureOpenAi,
) {
    match providers::azure_openai::list_models(&state.http_client, config).await {
        Ok(list) => {
            let ids: Vec<&str> = list.data.iter().map(|m| m.id.as_str()).collect();
            tracing::error!(
                requested = %config.deployment,
                available = ?ids,
                "Deployment not found; resource exposes these deployments"
            );
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to list available deployments");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_request() {
        let request = parse_chat_request(br#"{"message": "Hello"}"#).unwrap();
        assert_eq!(request.message, "Hello");
    }

    #[test]
    fn test_parse_empty_message_is_accepted() {
        let request = parse_chat_request(br#"{"message": ""}"#).unwrap();
        assert_eq!(request.message, "");
    }

    #[test]
    fn test_parse_missing_message_field() {
        let err = parse_chat_request(br#"{}"#).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref detail)
            if detail == "Message field is required"));
    }

    #[test]
    fn test_parse_non_string_message() {
        let err = parse_chat_request(br#"{"message": 42}"#).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref detail)
            if detail == "Message field must be a string"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_chat_request(b"not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref detail)
            if detail == "Invalid JSON"));
    }
}
