use serde::{Deserialize, Serialize};

/// Inbound payload for `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful reply: the completion text produced by the deployment.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}
