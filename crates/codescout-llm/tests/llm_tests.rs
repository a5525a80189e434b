//! Tests for codescout-llm: wire types, accumulated tool calls, summarizer

use codescout_llm::*;
use futures::stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ===========================================================================
// Wire types
// ===========================================================================

#[test]
fn llm_request_skips_absent_options() {
    let request = LlmRequest {
        model: "test-model".into(),
        messages: vec![LlmMessage::user("hi")],
        ..Default::default()
    };
    let json = serde_json::to_string(&request).unwrap();
    assert!(!json.contains("tools"));
    assert!(!json.contains("system"));
    assert!(!json.contains("max_tokens"));
}

#[test]
fn content_block_tagging() {
    let block = ContentBlock::ToolUse {
        id: "tc-1".into(),
        name: "directory".into(),
        input: serde_json::json!({"path": "src"}),
    };
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["type"], "tool_use");
    assert_eq!(json["name"], "directory");
}

#[test]
fn tool_result_error_flag_skipped_when_none() {
    let block = ContentBlock::ToolResult {
        tool_use_id: "tc-1".into(),
        content: "ok".into(),
        is_error: None,
    };
    let json = serde_json::to_string(&block).unwrap();
    assert!(!json.contains("is_error"));
}

#[test]
fn llm_content_text_serializes_as_plain_string() {
    let msg = LlmMessage::user("hello");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["content"], "hello");
}

#[test]
fn usage_total() {
    let usage = Usage {
        input_tokens: 1200,
        output_tokens: 300,
    };
    assert_eq!(usage.total(), 1500);
}

// ===========================================================================
// AccumulatedToolCall
// ===========================================================================

#[test]
fn accumulated_tool_call_parses_arguments() {
    let tc = AccumulatedToolCall {
        id: "tc-1".into(),
        name: "read_file".into(),
        arguments: r#"{"path":"src/main.rs"}"#.into(),
    };
    let parsed = tc.parse_arguments().unwrap();
    assert_eq!(parsed["path"], "src/main.rs");
}

#[test]
fn accumulated_tool_call_empty_arguments_is_empty_object() {
    let tc = AccumulatedToolCall::default();
    let parsed = tc.parse_arguments().unwrap();
    assert!(parsed.as_object().unwrap().is_empty());
}

#[test]
fn accumulated_tool_call_rejects_garbage() {
    let tc = AccumulatedToolCall {
        arguments: "not json".into(),
        ..Default::default()
    };
    assert!(tc.parse_arguments().is_err());
}

// ===========================================================================
// Summarizer over a scripted provider
// ===========================================================================

/// Provider that replies with a fixed text and records what it was asked.
struct ScriptedProvider {
    reply: String,
    calls: AtomicUsize,
    last_prompt: Mutex<String>,
    fail: bool,
}

impl ScriptedProvider {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(String::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete_stream(&self, request: LlmRequest) -> LlmResult<LlmStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(LlmMessage { content: LlmContent::Text(t), .. }) = request.messages.first() {
            *self.last_prompt.lock().unwrap() = t.clone();
        }
        if self.fail {
            return Err(LlmError::RequestFailed("scripted failure".into()));
        }
        let deltas = vec![
            Ok(StreamDelta::Text(self.reply.clone())),
            Ok(StreamDelta::Done {
                stop_reason: Some("end_turn".into()),
                usage: None,
            }),
        ];
        Ok(Box::pin(stream::iter(deltas)))
    }
}

#[tokio::test]
async fn summarizer_prefixes_and_splits() {
    let provider = Arc::new(ScriptedProvider::new("line one\nline two"));
    let summarizer = LlmSummarizer::new(provider.clone(), "test-model");
    let lines: Vec<String> = (0..250).map(|i| format!("raw {}", i)).collect();

    let summary = summarizer.summarize(&lines, "count things", 50).await.unwrap();
    assert!(summary[0].contains("250 lines"));
    assert_eq!(summary[1], "line one");
    assert_eq!(summary[2], "line two");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn summarizer_caps_adapter_input() {
    let provider = Arc::new(ScriptedProvider::new("ok"));
    let summarizer = LlmSummarizer::new(provider.clone(), "test-model");
    let lines: Vec<String> = (0..5000).map(|i| format!("raw {}", i)).collect();

    summarizer.summarize(&lines, "intent", 100).await.unwrap();

    let prompt = provider.last_prompt.lock().unwrap().clone();
    assert!(prompt.contains("raw 999"));
    assert!(!prompt.contains("raw 1000\n"));
    assert!(prompt.contains("truncated from 5000 to 1000 lines"));
}

#[tokio::test]
async fn summarizer_failure_bubbles_to_caller() {
    let provider = Arc::new(ScriptedProvider::failing());
    let summarizer = LlmSummarizer::new(provider, "test-model");
    let result = summarizer
        .summarize(&["x".to_string()], "intent", 10)
        .await;
    assert!(result.is_err());
}
