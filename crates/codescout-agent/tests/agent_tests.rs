//! Turn loop behavior against a scripted provider and a real gateway.

use codescout_agent::{AgentConfig, AgentError, AgentEvent, AgentRuntime};
use codescout_llm::{
    LlmContent, LlmError, LlmProvider, LlmRequest, LlmResult, LlmStream, StreamDelta, Summarizer,
    Usage,
};
use codescout_tools::{Gateway, PolicyApproval};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Plays back pre-scripted delta sequences, one per completion call.
struct ScriptedProvider {
    scripts: Mutex<VecDeque<Vec<StreamDelta>>>,
    requests_seen: Mutex<Vec<LlmRequest>>,
}

impl ScriptedProvider {
    fn new(scripts: Vec<Vec<StreamDelta>>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            requests_seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete_stream(&self, request: LlmRequest) -> LlmResult<LlmStream> {
        self.requests_seen.lock().unwrap().push(request);
        let deltas = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::RequestFailed("script exhausted".to_string()))?;
        Ok(Box::pin(futures::stream::iter(deltas.into_iter().map(Ok))))
    }
}

struct NoSummaries;

#[async_trait::async_trait]
impl Summarizer for NoSummaries {
    async fn summarize(
        &self,
        _lines: &[String],
        _intention: &str,
        _max_lines: usize,
    ) -> LlmResult<Vec<String>> {
        Err(LlmError::InvalidResponse("unused".to_string()))
    }
}

fn gateway(root: &Path) -> Arc<Gateway> {
    Arc::new(Gateway::new(
        root.to_path_buf(),
        100,
        Arc::new(PolicyApproval::allow_all()),
        Arc::new(NoSummaries),
    ))
}

fn done(stop_reason: &str) -> StreamDelta {
    StreamDelta::Done {
        stop_reason: Some(stop_reason.to_string()),
        usage: Some(Usage {
            input_tokens: 10,
            output_tokens: 5,
        }),
    }
}

fn tool_call(id: &str, name: &str, args: &str) -> Vec<StreamDelta> {
    vec![
        StreamDelta::ToolCallStart {
            id: id.to_string(),
            name: name.to_string(),
        },
        StreamDelta::ToolCallDelta {
            id: id.to_string(),
            arguments: args.to_string(),
        },
        StreamDelta::ToolCallEnd { id: id.to_string() },
        done("tool_use"),
    ]
}

async fn collect_events(mut rx: mpsc::Receiver<AgentEvent>) -> Vec<AgentEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn plain_answer_needs_no_tools() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![vec![
        StreamDelta::Text("it is a parser".to_string()),
        done("end_turn"),
    ]]));
    let runtime = AgentRuntime::new(provider, gateway(dir.path()), AgentConfig::default());

    let (tx, rx) = mpsc::channel(64);
    runtime.run_turn("what is this?", tx).await.unwrap();
    let events = collect_events(rx).await;

    assert!(matches!(events.first(), Some(AgentEvent::Text(t)) if t == "it is a parser"));
    match events.last() {
        Some(AgentEvent::Done { stop_reason, usage }) => {
            assert_eq!(stop_reason, "end_turn");
            assert_eq!(usage.total(), 15);
        }
        other => panic!("expected Done, got {:?}", other),
    }
    // user question + assistant answer
    assert_eq!(runtime.session().message_count().await, 2);
}

#[tokio::test]
async fn tool_round_trip_feeds_the_envelope_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "alpha\nbeta").unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call(
            "call_1",
            "read_file",
            r#"{"intention": "inspect notes", "path": "notes.txt"}"#,
        ),
        vec![StreamDelta::Text("the file lists greek letters".to_string()), done("end_turn")],
    ]));
    let runtime = AgentRuntime::new(
        provider.clone(),
        gateway(dir.path()),
        AgentConfig::default(),
    );

    let (tx, rx) = mpsc::channel(64);
    runtime.run_turn("what is in notes.txt?", tx).await.unwrap();
    let events = collect_events(rx).await;

    let result = events
        .iter()
        .find_map(|e| match e {
            AgentEvent::ToolResult { result, is_error, .. } => Some((result.clone(), *is_error)),
            _ => None,
        })
        .unwrap();
    assert!(!result.1);
    let envelope: serde_json::Value = serde_json::from_str(&result.0).unwrap();
    assert_eq!(envelope["total_count"], 2);
    assert_eq!(envelope["is_complete"], true);
    assert_eq!(envelope["items"][0], "alpha");

    // user, assistant(tool_use), user(tool_result), assistant(text)
    let messages = runtime.session().get_messages().await;
    assert_eq!(messages.len(), 4);
    assert!(matches!(messages[1].content, LlmContent::Blocks(_)));
    assert!(matches!(messages[2].content, LlmContent::Blocks(_)));

    // The second completion saw the tool result in its message list.
    let seen = provider.requests_seen.lock().unwrap();
    assert_eq!(seen[1].messages.len(), 3);
}

#[tokio::test]
async fn error_envelope_marks_the_tool_result() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call(
            "call_1",
            "read_file",
            r#"{"intention": "t", "path": "missing.txt"}"#,
        ),
        vec![StreamDelta::Text("that file does not exist".to_string()), done("end_turn")],
    ]));
    let runtime = AgentRuntime::new(provider, gateway(dir.path()), AgentConfig::default());

    let (tx, rx) = mpsc::channel(64);
    runtime.run_turn("read missing.txt", tx).await.unwrap();
    let events = collect_events(rx).await;

    let is_error = events
        .iter()
        .find_map(|e| match e {
            AgentEvent::ToolResult { is_error, .. } => Some(*is_error),
            _ => None,
        })
        .unwrap();
    assert!(is_error);
}

#[tokio::test]
async fn runaway_tool_loop_is_cut_off() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("f.txt"), "x").unwrap();

    // Three scripted responses, every one asking for another tool call.
    let script = (0..3)
        .map(|i| {
            tool_call(
                &format!("call_{}", i),
                "read_file",
                r#"{"intention": "t", "path": "f.txt"}"#,
            )
        })
        .collect();
    let provider = Arc::new(ScriptedProvider::new(script));
    let config = AgentConfig {
        max_tool_iterations: 2,
        ..AgentConfig::default()
    };
    let runtime = AgentRuntime::new(provider, gateway(dir.path()), config);

    let (tx, rx) = mpsc::channel(64);
    let err = runtime.run_turn("loop forever", tx).await.unwrap_err();
    assert!(matches!(err, AgentError::TooManyIterations(2)));

    let events = collect_events(rx).await;
    assert!(matches!(events.last(), Some(AgentEvent::Error(_))));
}
