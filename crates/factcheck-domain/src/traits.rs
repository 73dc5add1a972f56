//! Trait definitions for external interactions
//!
//! These traits define the boundary between the pipeline and the remote
//! text-generation services. Implementations live in `factcheck-llm`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model
    System,
    /// The request itself
    User,
}

/// One message of a chat-style request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System instruction
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// User request
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Errors returned by a [`ChatProvider`]
///
/// The pipeline only needs to tell rate limiting apart from every other
/// failure. The default implementation looks for an HTTP 429 or a
/// "rate limit" phrase in the message.
pub trait ProviderError: std::error::Error + Send + Sync + 'static {
    /// Whether the service asked the caller to slow down
    fn is_rate_limited(&self) -> bool {
        let message = self.to_string().to_lowercase();
        message.contains("429") || message.contains("rate limit")
    }
}

/// Trait for chat-completion services
///
/// Implemented by the infrastructure layer (factcheck-llm)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Error type for provider operations
    type Error: ProviderError;

    /// Send one chat request and return the reply text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error>;

    /// Model identifier, for log output
    fn model(&self) -> &str;
}
