//! LLM provider trait

use crate::types::{LlmRequest, StreamDelta};
use futures::Stream;
use std::pin::Pin;

pub type LlmResult<T> = Result<T, LlmError>;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("rate limited: retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("stream error: {0}")]
    StreamError(String),

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

pub type LlmStream = Pin<Box<dyn Stream<Item = LlmResult<StreamDelta>> + Send>>;

#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Stream a completion. Deltas arrive in model order; the final item
    /// before the stream closes is `StreamDelta::Done`.
    async fn complete_stream(&self, request: LlmRequest) -> LlmResult<LlmStream>;

    /// Convenience: run a completion and return the concatenated text.
    /// Tool-call deltas are ignored; callers that need them consume the
    /// stream directly.
    async fn complete_text(&self, request: LlmRequest) -> LlmResult<String> {
        use futures::StreamExt;
        let mut stream = self.complete_stream(request).await?;
        let mut text = String::new();
        while let Some(delta) = stream.next().await {
            match delta? {
                StreamDelta::Text(t) => text.push_str(&t),
                StreamDelta::Error(e) => return Err(LlmError::StreamError(e)),
                _ => {}
            }
        }
        Ok(text)
    }
}
