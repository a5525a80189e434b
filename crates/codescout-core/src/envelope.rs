//! The bounded result envelope every tool call returns
//!
//! The envelope is the one contract between the tool layer and the
//! orchestrating agent: how many items exist, how many were delivered,
//! whether the call completed, errored, or was declined, and an optional
//! summarized rendition when the raw result blew past the caller's limit.

use serde::{Deserialize, Serialize};

/// Result wrapper returned by every tool invocation.
///
/// Exactly one of {success, `error`, `aborted`} holds. Error and abort
/// envelopes carry empty items and zeroed counts; `detail` explains what
/// happened so the agent can react (e.g. regenerate a missing tag index).
/// All mutation goes through the constructors, which keep `is_complete`
/// consistent with the counts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub total_count: usize,
    pub returned_count: usize,
    pub items: Vec<T>,
    pub is_complete: bool,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub aborted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<String>>,
    #[serde(default)]
    pub is_summarized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl<T> Envelope<T> {
    /// A successful, untruncated result. `total_count` may exceed the number
    /// of items for byte-counted results (e.g. file writes).
    pub fn new(total_count: usize, items: Vec<T>) -> Self {
        Self {
            total_count,
            returned_count: total_count,
            items,
            is_complete: true,
            error: false,
            aborted: false,
            summary: None,
            is_summarized: false,
            detail: None,
        }
    }

    /// A successful but truncated result. `returned_count` must not exceed
    /// `total_count`; the constructor clamps rather than trusting callers.
    pub fn partial(total_count: usize, returned_count: usize, items: Vec<T>) -> Self {
        let returned_count = returned_count.min(total_count);
        Self {
            total_count,
            returned_count,
            items,
            is_complete: returned_count == total_count,
            error: false,
            aborted: false,
            summary: None,
            is_summarized: false,
            detail: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    /// The underlying operation failed. Payload is empty, counts are zeroed.
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            total_count: 0,
            returned_count: 0,
            items: Vec::new(),
            is_complete: false,
            error: true,
            aborted: false,
            summary: None,
            is_summarized: false,
            detail: Some(detail.into()),
        }
    }

    /// The user declined the approval prompt before anything ran.
    pub fn aborted() -> Self {
        Self {
            total_count: 0,
            returned_count: 0,
            items: Vec::new(),
            is_complete: false,
            error: false,
            aborted: false,
            summary: None,
            is_summarized: false,
            detail: Some("tool call aborted by user".to_string()),
        }
        .mark_aborted()
    }

    fn mark_aborted(mut self) -> Self {
        self.aborted = true;
        self
    }

    /// Attach a summarized rendition of an oversized raw result.
    pub fn attach_summary(&mut self, summary: Vec<String>) {
        self.summary = Some(summary);
        self.is_summarized = true;
    }

    pub fn missing_count(&self) -> usize {
        self.total_count - self.returned_count
    }

    pub fn is_success(&self) -> bool {
        !self.error && !self.aborted
    }
}
