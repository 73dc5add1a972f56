//! OpenAI-compatible chat-completion provider
//!
//! Works with any service exposing `POST {base_url}/chat/completions` in the
//! OpenAI request/response shape. OpenRouter and Perplexity both do.
//!
//! # Examples
//!
//! ```no_run
//! use factcheck_llm::{OpenAiCompatibleProvider, ProviderOptions};
//!
//! let provider = OpenAiCompatibleProvider::new(ProviderOptions {
//!     api_key: std::env::var("OPENROUTER_API_KEY").ok(),
//!     referer: Some("https://example.com".to_string()),
//!     site_name: Some("factcheck".to_string()),
//!     ..ProviderOptions::new("https://openrouter.ai/api/v1", "openai/gpt-4o-2024-11-20")
//! })
//! .unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use factcheck_domain::{ChatMessage, ChatProvider};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default transport timeout for one request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for an [`OpenAiCompatibleProvider`]
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    /// API base, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token; requests go out unauthenticated when absent
    pub api_key: Option<String>,
    /// Optional `HTTP-Referer` routing header
    pub referer: Option<String>,
    /// Optional `X-Title` routing header
    pub site_name: Option<String>,
    /// Transport timeout
    pub timeout: Duration,
}

impl ProviderOptions {
    /// Options with no credentials or routing headers
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            referer: None,
            site_name: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Chat provider for OpenAI-style HTTP APIs
pub struct OpenAiCompatibleProvider {
    endpoint: String,
    options: ProviderOptions,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// Create a provider from connection options
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Other`] if the HTTP client cannot be built.
    pub fn new(options: ProviderOptions) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: completions_url(&options.base_url),
            options,
            client,
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error> {
        let body = ChatCompletionRequest {
            model: &self.options.model,
            messages,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.options.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(referer) = &self.options.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(site_name) = &self.options.site_name {
            request = request.header("X-Title", site_name);
        }

        debug!("POST {} (model {})", self.endpoint, self.options.model);

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, &text, &self.options.model));
        }

        parse_completion(&text)
    }

    fn model(&self) -> &str {
        &self.options.model
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Map a non-success HTTP status to an error
fn status_error(status: StatusCode, body: &str, model: &str) -> LlmError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

/// Pull the first choice's text out of a response body
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_domain::ProviderError;

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url("https://api.perplexity.ai"),
            "https://api.perplexity.ai/chat/completions"
        );
        assert_eq!(
            completions_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiCompatibleProvider::new(ProviderOptions::new(
            "https://api.perplexity.ai",
            "llama-3.1-sonar-large-128k-online",
        ))
        .unwrap();
        assert_eq!(provider.endpoint(), "https://api.perplexity.ai/chat/completions");
        assert_eq!(provider.model(), "llama-3.1-sonar-large-128k-online");
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("be terse"), ChatMessage::user("hi")];
        let body = ChatCompletionRequest { model: "m", messages: &messages };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"<result>true</result>"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "<result>true</result>");
    }

    #[test]
    fn test_parse_completion_without_content() {
        let body = r#"{"choices":[]}"#;
        assert!(matches!(parse_completion(body), Err(LlmError::InvalidResponse(_))));

        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(matches!(parse_completion(body), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_completion_garbage() {
        assert!(matches!(parse_completion("<html>"), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_status_mapping() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "", "m");
        assert!(matches!(err, LlmError::RateLimitExceeded));
        assert!(err.is_rate_limited());

        let err = status_error(StatusCode::UNAUTHORIZED, "no key", "m");
        assert!(matches!(err, LlmError::Authentication(_)));

        let err = status_error(StatusCode::NOT_FOUND, "", "m");
        assert!(matches!(err, LlmError::ModelNotAvailable(ref m) if m == "m"));

        let err = status_error(StatusCode::BAD_GATEWAY, "upstream", "m");
        assert!(matches!(err, LlmError::Communication(_)));
        assert!(!err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Nothing listens on port 9 locally
        let provider = OpenAiCompatibleProvider::new(ProviderOptions {
            timeout: Duration::from_secs(2),
            ..ProviderOptions::new("http://127.0.0.1:9", "m")
        })
        .unwrap();

        let result = provider.complete(&[ChatMessage::user("test")]).await;
        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }
}
