//! Factcheck LLM Provider Layer
//!
//! Implementations of the `ChatProvider` trait from `factcheck-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `OpenAiCompatibleProvider`: Any OpenAI-style `/chat/completions` API
//!   (OpenRouter, Perplexity, ...)
//!
//! Providers make exactly one request per call. Retrying is the caller's
//! job, so that rate limits and malformed replies share one retry budget.
//!
//! # Examples
//!
//! ```
//! use factcheck_domain::{ChatMessage, ChatProvider};
//! use factcheck_llm::MockProvider;
//!
//! # tokio_test_block_on(async {
//! let provider = MockProvider::new("<result>true</result>");
//! let reply = provider.complete(&[ChatMessage::user("Verify this fact: x")]).await.unwrap();
//! assert_eq!(reply, "<result>true</result>");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use factcheck_domain::{ChatMessage, ChatProvider, ProviderError, Role};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::{OpenAiCompatibleProvider, ProviderOptions, DEFAULT_TIMEOUT_SECS};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded (HTTP 429)")]
    RateLimitExceeded,

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl ProviderError for LlmError {
    fn is_rate_limited(&self) -> bool {
        match self {
            LlmError::RateLimitExceeded => true,
            other => {
                let message = other.to_string().to_lowercase();
                message.contains("429") || message.contains("rate limit")
            }
        }
    }
}

/// One scripted reply of a [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail with [`LlmError::RateLimitExceeded`]
    RateLimited,
    /// Fail with [`LlmError::Other`] carrying this message
    Fail(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, LlmError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::RateLimited => Err(LlmError::RateLimitExceeded),
            MockReply::Fail(message) => Err(LlmError::Other(message)),
        }
    }
}

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen per call in this order:
///
/// 1. the next scripted reply registered for the request's user message
/// 2. the next reply of the shared queue
/// 3. the default response
///
/// Clones share scripts, call counts, and the prompt log.
///
/// # Examples
///
/// ```
/// use factcheck_domain::{ChatMessage, ChatProvider};
/// use factcheck_llm::{MockProvider, MockReply};
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let provider = MockProvider::default();
/// provider.add_reply("Verify this fact: a", MockReply::RateLimited);
/// provider.add_response("Verify this fact: a", "<result>true</result>");
///
/// let msgs = [ChatMessage::user("Verify this fact: a")];
/// assert!(provider.complete(&msgs).await.is_err());
/// assert_eq!(provider.complete(&msgs).await.unwrap(), "<result>true</result>");
/// assert_eq!(provider.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
    default_response: String,
    scripts: Arc<Mutex<HashMap<String, VecDeque<MockReply>>>>,
    queue: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            model: "mock".to_string(),
            default_response: response.into(),
            scripts: Arc::new(Mutex::new(HashMap::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the model name reported by [`ChatProvider::model`]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Append a scripted reply for a given user message
    pub fn add_reply(&self, prompt: impl Into<String>, reply: MockReply) {
        self.scripts
            .lock()
            .unwrap()
            .entry(prompt.into())
            .or_default()
            .push_back(reply);
    }

    /// Append a text reply for a given user message
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.add_reply(prompt, MockReply::Text(response.into()));
    }

    /// Append a failure for a given user message
    pub fn add_error(&self, prompt: impl Into<String>) {
        self.add_reply(prompt, MockReply::Fail("Mock error".to_string()));
    }

    /// Append a reply to the shared queue, used by any prompt without a script
    pub fn push_reply(&self, reply: MockReply) {
        self.queue.lock().unwrap().push_back(reply);
    }

    /// Append a text reply to the shared queue
    pub fn push_response(&self, response: impl Into<String>) {
        self.push_reply(MockReply::Text(response.into()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Number of calls whose user message matched `prompt`
    pub fn calls_for(&self, prompt: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == prompt)
            .count()
    }

    /// User messages received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap().clear();
    }

    fn next_reply(&self, prompt: &str) -> MockReply {
        if let Some(reply) = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(prompt)
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }
        if let Some(reply) = self.queue.lock().unwrap().pop_front() {
            return reply;
        }
        MockReply::Text(self.default_response.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, Self::Error> {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        self.prompts.lock().unwrap().push(prompt.clone());
        self.next_reply(&prompt).into_result()
    }

    fn model(&self) -> &str {
        &self.model
    }
}
