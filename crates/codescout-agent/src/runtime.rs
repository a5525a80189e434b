//! Agent runtime - the streaming tool-call loop

use crate::session::Session;
use codescout_llm::{
    AccumulatedToolCall, ContentBlock, LlmProvider, LlmRequest, StreamDelta, Usage,
};
use codescout_tools::{tool_definitions, Gateway};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Clone, Debug)]
pub enum AgentEvent {
    Text(String),
    ToolCallStart {
        id: String,
        name: String,
    },
    ToolExecuting {
        id: String,
        name: String,
    },
    ToolResult {
        id: String,
        name: String,
        /// Serialized result envelope, exactly what the model sees.
        result: String,
        is_error: bool,
    },
    Done {
        stop_reason: String,
        usage: Usage,
    },
    Error(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] codescout_llm::LlmError),

    #[error("exceeded {0} tool iterations in one turn")]
    TooManyIterations(usize),
}

pub struct AgentConfig {
    pub model: String,
    pub max_tokens: u32,
    pub max_tool_iterations: usize,
    pub system_prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 8192,
            max_tool_iterations: 25,
            system_prompt: String::new(),
        }
    }
}

pub struct AgentRuntime {
    provider: Arc<dyn LlmProvider>,
    gateway: Arc<Gateway>,
    session: Arc<Session>,
    config: AgentConfig,
}

impl AgentRuntime {
    pub fn new(provider: Arc<dyn LlmProvider>, gateway: Arc<Gateway>, config: AgentConfig) -> Self {
        Self {
            provider,
            gateway,
            session: Arc::new(Session::new()),
            config,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run one user turn: stream completions and execute requested tool
    /// calls until the model stops asking for tools. Events are delivered
    /// in order on `event_tx`; the final event is always `Done` or `Error`.
    pub async fn run_turn(
        &self,
        user_message: &str,
        event_tx: mpsc::Sender<AgentEvent>,
    ) -> Result<(), AgentError> {
        self.session.add_user_message(user_message).await;

        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > self.config.max_tool_iterations {
                let err = AgentError::TooManyIterations(self.config.max_tool_iterations);
                let _ = event_tx.send(AgentEvent::Error(err.to_string())).await;
                return Err(err);
            }

            let request = LlmRequest {
                model: self.config.model.clone(),
                messages: self.session.get_messages().await,
                tools: Some(tool_definitions()),
                max_tokens: Some(self.config.max_tokens),
                system: Some(self.config.system_prompt.clone()),
            };

            let stream = match self.provider.complete_stream(request).await {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = event_tx.send(AgentEvent::Error(e.to_string())).await;
                    return Err(e.into());
                }
            };
            tokio::pin!(stream);

            let mut text_content = String::new();
            let mut tool_calls: Vec<AccumulatedToolCall> = Vec::new();
            let mut current_tool: Option<AccumulatedToolCall> = None;
            let mut stop_reason = "end_turn".to_string();

            while let Some(delta) = stream.next().await {
                match delta {
                    Ok(StreamDelta::Text(text)) => {
                        text_content.push_str(&text);
                        let _ = event_tx.send(AgentEvent::Text(text)).await;
                    }
                    Ok(StreamDelta::ToolCallStart { id, name }) => {
                        current_tool = Some(AccumulatedToolCall {
                            id: id.clone(),
                            name: name.clone(),
                            arguments: String::new(),
                        });
                        let _ = event_tx.send(AgentEvent::ToolCallStart { id, name }).await;
                    }
                    Ok(StreamDelta::ToolCallDelta { arguments, .. }) => {
                        if let Some(tool) = current_tool.as_mut() {
                            tool.arguments.push_str(&arguments);
                        }
                    }
                    Ok(StreamDelta::ToolCallEnd { .. }) => {
                        if let Some(tool) = current_tool.take() {
                            tool_calls.push(tool);
                        }
                    }
                    Ok(StreamDelta::Done {
                        stop_reason: reason,
                        usage,
                    }) => {
                        if let Some(reason) = reason {
                            stop_reason = reason;
                        }
                        if let Some(usage) = usage {
                            self.session.add_usage(usage).await;
                        }
                    }
                    Ok(StreamDelta::Error(e)) => {
                        warn!("stream error mid-turn: {}", e);
                        let _ = event_tx.send(AgentEvent::Error(e)).await;
                    }
                    Err(e) => {
                        let _ = event_tx.send(AgentEvent::Error(e.to_string())).await;
                        return Err(e.into());
                    }
                }
            }

            if tool_calls.is_empty() {
                self.session.add_assistant_text(&text_content).await;
                info!(
                    "turn complete: {} messages, ~{} tokens used",
                    self.session.message_count().await,
                    self.session.usage().await.total()
                );
                let _ = event_tx
                    .send(AgentEvent::Done {
                        stop_reason,
                        usage: self.session.usage().await,
                    })
                    .await;
                return Ok(());
            }

            let blocks: Vec<ContentBlock> = tool_calls
                .iter()
                .map(|tc| ContentBlock::ToolUse {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    input: tc.parse_arguments().unwrap_or_default(),
                })
                .collect();
            self.session
                .add_assistant_with_tools(
                    (!text_content.is_empty()).then_some(text_content.as_str()),
                    blocks,
                )
                .await;

            let mut results = Vec::with_capacity(tool_calls.len());
            for tc in tool_calls {
                let _ = event_tx
                    .send(AgentEvent::ToolExecuting {
                        id: tc.id.clone(),
                        name: tc.name.clone(),
                    })
                    .await;

                let args = match tc.parse_arguments() {
                    Ok(args) => args,
                    Err(e) => {
                        debug!("unparseable arguments for '{}': {}", tc.name, e);
                        serde_json::Value::Object(serde_json::Map::new())
                    }
                };
                let envelope = self.gateway.dispatch(&tc.name, &args).await;
                let is_error = envelope.error;
                let content = serde_json::to_string(&envelope)
                    .unwrap_or_else(|e| format!("{{\"error\":true,\"detail\":\"{}\"}}", e));

                let _ = event_tx
                    .send(AgentEvent::ToolResult {
                        id: tc.id.clone(),
                        name: tc.name.clone(),
                        result: content.clone(),
                        is_error,
                    })
                    .await;

                results.push(ContentBlock::ToolResult {
                    tool_use_id: tc.id,
                    content,
                    is_error: is_error.then_some(true),
                });
            }
            self.session.add_tool_results(results).await;

            debug!("tool calls executed, continuing turn (iteration {})", iterations);
        }
    }
}
