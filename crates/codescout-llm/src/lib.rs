//! Codescout LLM - Anthropic provider with streaming, plus the
//! summarization adapter the tool gateway falls back to for oversized
//! results.

pub mod anthropic;
pub mod provider;
pub mod summarizer;
pub mod types;

pub use anthropic::AnthropicProvider;
pub use provider::{LlmError, LlmProvider, LlmResult, LlmStream};
pub use summarizer::{LlmSummarizer, Summarizer, SUMMARIZE_INPUT_CEILING};
pub use types::*;
