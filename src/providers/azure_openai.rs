use crate::{
    config::ResolvedAzureOpenAi,
    error::AppError,
    models::openai::{ChatCompletionRequest, ChatCompletionResponse, ModelList},
};
use reqwest::Client;
use std::time::Duration;

/// Azure OpenAI chat-completion call.
///
/// URL pattern: `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={v}`
/// Auth: `api-key` header (not Bearer)
pub async fn chat_completions(
    client: &Client,
    config: &ResolvedAzureOpenAi,
    request: &ChatCompletionRequest,
) -> Result<ChatCompletionResponse, AppError> {
    let url = chat_completions_url(config);

    let response = client
        .post(&url)
        .header("api-key", &config.api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(config.timeout_seconds))
        .json(request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Upstream(extract_error_message(&body)
            .unwrap_or_else(|| format!("upstream returned {}: {}", status, body))));
    }

    let body: ChatCompletionResponse = response.json().await?;
    Ok(body)
}

/// List deployments visible to the configured resource. Used only for
/// diagnostic logging when a completion call fails with an unknown model.
pub async fn list_models(
    client: &Client,
    config: &ResolvedAzureOpenAi,
) -> Result<ModelList, AppError> {
    let url = format!(
        "{}/openai/models?api-version={}",
        config.endpoint, config.api_version
    );

    let response = client
        .get(&url)
        .header("api-key", &config.api_key)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(AppError::Upstream(format!(
            "model listing returned {}",
            status
        )));
    }

    let list: ModelList = response.json().await?;
    Ok(list)
}

fn chat_completions_url(config: &ResolvedAzureOpenAi) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        config.endpoint, config.deployment, config.api_version
    )
}

/// Pull the provider's own message out of an Azure/OpenAI error body.
///
/// Error bodies look like `{"error": {"code": "...", "message": "..."}}`;
/// returns `None` when the body is not in that shape.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Classify whether an upstream failure means the requested deployment or
/// model does not exist. Matches the structured Azure error code when present
/// and falls back to message text.
pub fn is_model_not_found(detail: &str) -> bool {
    let lowered = detail.to_lowercase();
    lowered.contains("model not found")
        || lowered.contains("deploymentnotfound")
        || lowered.contains("deployment for this resource does not exist")
}
