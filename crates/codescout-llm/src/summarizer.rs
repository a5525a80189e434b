//! Summarization adapter
//!
//! When a tool result exceeds the session limit, the gateway hands the raw
//! lines plus the original call intention to a secondary model call that
//! distills them. Failure here must never fail the parent tool call; the
//! gateway degrades to the truncated raw result.

use crate::provider::{LlmError, LlmProvider, LlmResult};
use crate::types::{LlmMessage, LlmRequest};
use std::sync::Arc;
use tracing::info;

/// Hard ceiling on how many raw lines are ever sent to the adapter,
/// bounding its input regardless of how large the tool output was.
pub const SUMMARIZE_INPUT_CEILING: usize = 1000;

const SYSTEM_PROMPT: &str = "\
You are a specialized summarizer agent. You read raw outputs from codebase \
tools (file contents, command output, directory listings, tag queries) and \
produce a concise summary focused on the stated intention of the tool call.

Rules:
- Extract only the lines or items relevant to the intention; never \
copy-paste entire contents.
- Preserve critical details verbatim: file paths, symbol names, error \
messages, short code snippets.
- Always use full paths from the project root.
- No commentary about your own reasoning; output the distilled content only.";

#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Condense `lines` into at most `max_lines` with respect to the
    /// original `intention` of the tool call.
    async fn summarize(
        &self,
        lines: &[String],
        intention: &str,
        max_lines: usize,
    ) -> LlmResult<Vec<String>>;
}

/// Provider-backed summarizer.
pub struct LlmSummarizer {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmSummarizer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn build_prompt(lines: &[String], intention: &str, max_lines: usize, original_len: usize) -> String {
        let truncation_notice = if original_len > lines.len() {
            format!(" (input truncated from {} to {} lines)", original_len, lines.len())
        } else {
            String::new()
        };
        format!(
            "Tool output to summarize{}:\n{}\n\nOriginal intention of the tool call:\n{}\n\n\
             Extract and distill the relevant parts in {} lines or less.",
            truncation_notice,
            lines.join("\n"),
            intention,
            max_lines
        )
    }
}

#[async_trait::async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(
        &self,
        lines: &[String],
        intention: &str,
        max_lines: usize,
    ) -> LlmResult<Vec<String>> {
        let original_len = lines.len();
        let capped = &lines[..lines.len().min(SUMMARIZE_INPUT_CEILING)];
        if capped.len() < original_len {
            info!(
                "summarizer input capped from {} to {} lines",
                original_len,
                capped.len()
            );
        }

        let prompt = Self::build_prompt(capped, intention, max_lines, original_len);
        let request = LlmRequest {
            model: self.model.clone(),
            messages: vec![LlmMessage::user(prompt)],
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: Some(4096),
            tools: None,
        };

        let text = self.provider.complete_text(request).await?;
        if text.trim().is_empty() {
            return Err(LlmError::InvalidResponse("empty summary".to_string()));
        }

        let mut result = vec![format!(
            "The tool result output was too long ({} lines), here is a summarization:",
            original_len
        )];
        result.extend(text.lines().map(str::to_string));
        Ok(result)
    }
}
