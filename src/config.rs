use crate::error::AppError;
use std::env;

/// Default Azure OpenAI REST API version.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Default upper bound on completion tokens per request.
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Default upstream request timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: AzureOpenAiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Azure OpenAI connection settings, captured once at process start.
///
/// Required values are kept as `Option` so the server can come up with an
/// incomplete environment; `resolve` validates them per request and turns
/// gaps into a configuration error before any network call.
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

/// Fully-validated provider settings for a single upstream call.
#[derive(Debug, Clone)]
pub struct ResolvedAzureOpenAi {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl AzureOpenAiConfig {
    /// Read provider settings from the process environment.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("OPENAI_API_KEY"),
            endpoint: non_empty_var("AZURE_OPENAI_ENDPOINT"),
            deployment: non_empty_var("DEPLOYMENT_NAME"),
            api_version: non_empty_var("OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: non_empty_var("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Validate required settings, naming every missing variable.
    pub fn resolve(&self) -> Result<ResolvedAzureOpenAi, AppError> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if self.endpoint.is_none() {
            missing.push("AZURE_OPENAI_ENDPOINT");
        }
        if self.deployment.is_none() {
            missing.push("DEPLOYMENT_NAME");
        }
        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(ResolvedAzureOpenAi {
            api_key: self.api_key.clone().unwrap_or_default(),
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            deployment: self.deployment.clone().unwrap_or_default(),
            api_version: self.api_version.clone(),
            max_tokens: self.max_tokens,
            timeout_seconds: self.timeout_seconds,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> AzureOpenAiConfig {
        AzureOpenAiConfig {
            api_key: Some("test-key".to_string()),
            endpoint: Some("https://example.openai.azure.com/".to_string()),
            deployment: Some("gpt-4".to_string()),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    #[test]
    fn test_resolve_complete_config() {
        let resolved = complete_config().resolve().unwrap();
        assert_eq!(resolved.deployment, "gpt-4");
        assert_eq!(resolved.max_tokens, 800);
    }

    #[test]
    fn test_resolve_trims_trailing_slash() {
        let resolved = complete_config().resolve().unwrap();
        assert_eq!(resolved.endpoint, "https://example.openai.azure.com");
    }

    #[test]
    fn test_resolve_reports_missing_values() {
        let mut cfg = complete_config();
        cfg.api_key = None;
        cfg.endpoint = None;

        let err = cfg.resolve().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("OPENAI_API_KEY"));
        assert!(message.contains("AZURE_OPENAI_ENDPOINT"));
        assert!(!message.contains("DEPLOYMENT_NAME"));
    }

    #[test]
    fn test_resolve_reports_missing_deployment() {
        let mut cfg = complete_config();
        cfg.deployment = None;

        let err = cfg.resolve().unwrap_err();
        assert!(err.to_string().contains("DEPLOYMENT_NAME"));
    }
}
