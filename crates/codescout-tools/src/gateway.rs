//! Tool execution gateway
//!
//! Every tool call the agent makes funnels through [`Gateway::dispatch`]:
//! parse into a typed request, present it for approval, execute, then
//! bound the result. The console lock is held for the whole call, so
//! prompts, verbose echoes, and completion lines from concurrent calls
//! never interleave. Dispatch itself is infallible; failures become error
//! envelopes the model can read and react to.

use crate::approval::ApprovalSource;
use crate::console::{Console, Tint};
use crate::request::ToolRequest;
use crate::tools::{self, RawResult};
use codescout_core::Envelope;
use codescout_llm::Summarizer;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Line budget handed to the summarizer for oversized results.
pub const SUMMARY_MAX_LINES: usize = 200;

pub struct Gateway {
    project_root: PathBuf,
    limit: usize,
    verbose: bool,
    console: Console,
    console_lock: Mutex<()>,
    approval: Arc<dyn ApprovalSource>,
    summarizer: Arc<dyn Summarizer>,
}

impl Gateway {
    pub fn new(
        project_root: PathBuf,
        limit: usize,
        approval: Arc<dyn ApprovalSource>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            project_root,
            limit,
            verbose: false,
            console: Console::new(),
            console_lock: Mutex::new(()),
            approval,
            summarizer,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Run one tool call end to end. The `intention` parameter the model
    /// fills in is pulled from `args`; it drives both the approval prompt
    /// and the summarizer.
    pub async fn dispatch(&self, name: &str, args: &Value) -> Envelope<String> {
        // One call owns the console from prompt to completion line.
        let _console = self.console_lock.lock().await;

        let intention = args
            .get("intention")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let request = match ToolRequest::parse(name, args, &self.project_root) {
            Ok(request) => request,
            Err(e) => {
                warn!("rejected tool call '{}': {}", name, e);
                self.console
                    .line(Tint::Red, &format!("invalid tool call: {}", e));
                return Envelope::error(e.to_string());
            }
        };

        let mut description = vec![format!("intention: {}", intention)];
        description.extend(request.describe(self.limit));
        self.approval.present(&description).await;

        match self.approval.await_decision().await {
            Ok(true) => {}
            Ok(false) => {
                info!("tool call '{}' declined", request.name());
                self.console.line(Tint::Red, "tool call aborted");
                return Envelope::aborted();
            }
            Err(e) => {
                warn!("approval channel failed: {}", e);
                return Envelope::error(format!("approval failed: {}", e));
            }
        }

        let raw = match self.execute(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("tool '{}' failed: {}", request.name(), e);
                self.console.line(Tint::Red, &e.to_string());
                return Envelope::error(e.to_string());
            }
        };

        let envelope = self.bound(raw, &intention).await;

        if self.verbose {
            for item in &envelope.items {
                self.console.line(Tint::Yellow, item);
            }
        }
        self.console.line(
            Tint::Green,
            &format!(
                "{}: returned {} of {}{}",
                request.name(),
                envelope.returned_count,
                envelope.total_count,
                if envelope.is_summarized {
                    " (summarized)"
                } else {
                    ""
                }
            ),
        );

        envelope
    }

    async fn execute(&self, request: &ToolRequest) -> codescout_core::Result<RawResult> {
        match request {
            ToolRequest::Directory {
                path,
                max_depth,
                exclude_dirs,
                file_filter,
                hide_empty_folder,
            } => tools::directory::scan(
                path,
                &tools::directory::ScanOptions {
                    max_depth: *max_depth,
                    exclude_dirs: exclude_dirs.clone(),
                    file_filter: file_filter.clone(),
                    hide_empty_folder: *hide_empty_folder,
                },
            ),
            ToolRequest::Tags { action, path } => tools::tags::run(path, action).await,
            ToolRequest::Terminal {
                command,
                working_dir,
            } => tools::terminal::run(command, working_dir).await,
            ToolRequest::ReadFile { path } => tools::read_file::run(path).await,
            ToolRequest::WriteFile { path, content } => {
                tools::write_file::run(path, content).await
            }
        }
    }

    /// Apply the session limit: truncate the item list, and attach a
    /// summarized rendition of the full raw output. A summarizer failure
    /// degrades to the truncated raw result, never to a failed call.
    ///
    /// Truncation keys off `items.len()`, not `total_count`: byte-counted
    /// results (file writes) carry one status line and must stay complete.
    async fn bound(&self, raw: RawResult, intention: &str) -> Envelope<String> {
        if raw.items.len() <= self.limit {
            return Envelope::new(raw.total_count, raw.items);
        }

        let omitted = raw.items.len() - self.limit;
        let mut items: Vec<String> = raw.items[..self.limit].to_vec();
        items.push(format!("content truncated, {} items omitted", omitted));
        let mut envelope =
            Envelope::partial(raw.total_count, raw.total_count.min(self.limit), items);

        info!(
            "result over limit ({} > {}), summarizing",
            raw.items.len(),
            self.limit
        );
        match self
            .summarizer
            .summarize(&raw.items, intention, SUMMARY_MAX_LINES)
            .await
        {
            Ok(summary) => envelope.attach_summary(summary),
            Err(e) => {
                warn!("summarization failed, keeping truncated output: {}", e);
                self.console.line(
                    Tint::Yellow,
                    "summarization failed, returning truncated output",
                );
            }
        }
        envelope
    }
}
