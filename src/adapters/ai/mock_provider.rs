//! Mock AI Provider for testing.
//!
//! Scripted implementation of the AIProvider port so the chat flow can be
//! exercised without calling a real LLM. Replies and failures are consumed
//! in the order they were queued; every request is recorded.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Hello, I'm the assistant!")
//!     .with_error(MockError::Timeout { timeout_secs: 30 });
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(response.content, "Hello, I'm the assistant!");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Queued outcomes, consumed front first.
    script: Arc<Mutex<VecDeque<Result<String, MockError>>>>,
    /// Every request received, oldest first.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// Failures the mock can be scripted to return.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Upstream 5xx or overload.
    Unavailable { message: String },
    /// Rejected API key.
    AuthenticationFailed,
    /// Connection failure.
    Network { message: String },
    /// Undecodable response body.
    Malformed { message: String },
    /// Client timeout elapsed.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Malformed { message } => AIError::parse(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Reply used once the script is exhausted.
    pub const DEFAULT_REPLY: &'static str = "Mock response";

    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.script).push_back(Ok(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.script).push_back(Err(error));
        self
    }

    /// Number of completion calls received.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// The most recent request, if any.
    pub fn last_call(&self) -> Option<CompletionRequest> {
        lock(&self.calls).last().cloned()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        let next = lock(&self.script).pop_front();
        match next {
            Some(Ok(content)) => Ok(CompletionResponse::new(content)),
            Some(Err(err)) => Err(err.into()),
            None => Ok(CompletionResponse::new(Self::DEFAULT_REPLY)),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}
