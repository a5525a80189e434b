//! Conversation state
//!
//! One session per REPL run: the ordered message history plus cumulative
//! token usage. All access is through async methods so the runtime and the
//! front end can share it behind an `Arc`.

use codescout_llm::{ContentBlock, LlmContent, LlmMessage, Usage};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct Session {
    messages: RwLock<Vec<LlmMessage>>,
    usage: RwLock<Usage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user_message(&self, text: &str) {
        self.messages.write().await.push(LlmMessage::user(text));
    }

    pub async fn add_assistant_text(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.messages.write().await.push(LlmMessage::assistant(text));
    }

    /// Assistant turn that requested tool calls: optional leading text plus
    /// the tool_use blocks, in model order.
    pub async fn add_assistant_with_tools(&self, text: Option<&str>, tools: Vec<ContentBlock>) {
        let mut blocks = Vec::with_capacity(tools.len() + 1);
        if let Some(text) = text {
            blocks.push(ContentBlock::Text {
                text: text.to_string(),
            });
        }
        blocks.extend(tools);
        self.messages.write().await.push(LlmMessage {
            role: "assistant".to_string(),
            content: LlmContent::Blocks(blocks),
        });
    }

    /// All tool results for one assistant turn go back in a single user
    /// message, as the protocol requires.
    pub async fn add_tool_results(&self, results: Vec<ContentBlock>) {
        if results.is_empty() {
            return;
        }
        self.messages.write().await.push(LlmMessage {
            role: "user".to_string(),
            content: LlmContent::Blocks(results),
        });
    }

    /// Inject file content the user volunteered via `/add-context`.
    pub async fn add_context(&self, label: &str, content: &str) {
        let text = format!("Additional context from {}:\n\n{}", label, content);
        self.add_user_message(&text).await;
    }

    pub async fn get_messages(&self) -> Vec<LlmMessage> {
        self.messages.read().await.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn add_usage(&self, delta: Usage) {
        let mut usage = self.usage.write().await;
        usage.input_tokens += delta.input_tokens;
        usage.output_tokens += delta.output_tokens;
    }

    pub async fn usage(&self) -> Usage {
        *self.usage.read().await
    }

    pub async fn clear(&self) {
        self.messages.write().await.clear();
        *self.usage.write().await = Usage::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn history_preserves_order() {
        let session = Session::new();
        session.add_user_message("question").await;
        session.add_assistant_text("answer").await;

        let messages = session.get_messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
    }

    #[tokio::test]
    async fn empty_assistant_text_is_dropped() {
        let session = Session::new();
        session.add_assistant_text("").await;
        assert_eq!(session.message_count().await, 0);
    }

    #[tokio::test]
    async fn tool_results_share_one_user_message() {
        let session = Session::new();
        session
            .add_tool_results(vec![
                ContentBlock::ToolResult {
                    tool_use_id: "a".into(),
                    content: "{}".into(),
                    is_error: None,
                },
                ContentBlock::ToolResult {
                    tool_use_id: "b".into(),
                    content: "{}".into(),
                    is_error: Some(true),
                },
            ])
            .await;

        let messages = session.get_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        match &messages[0].content {
            LlmContent::Blocks(blocks) => assert_eq!(blocks.len(), 2),
            other => panic!("expected blocks, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn usage_accumulates_across_turns() {
        let session = Session::new();
        session
            .add_usage(Usage {
                input_tokens: 100,
                output_tokens: 20,
            })
            .await;
        session
            .add_usage(Usage {
                input_tokens: 300,
                output_tokens: 50,
            })
            .await;

        let usage = session.usage().await;
        assert_eq!(usage.input_tokens, 400);
        assert_eq!(usage.output_tokens, 70);
        assert_eq!(usage.total(), 470);
    }

    #[tokio::test]
    async fn clear_resets_everything() {
        let session = Session::new();
        session.add_user_message("x").await;
        session
            .add_usage(Usage {
                input_tokens: 1,
                output_tokens: 1,
            })
            .await;
        session.clear().await;
        assert_eq!(session.message_count().await, 0);
        assert_eq!(session.usage().await.total(), 0);
    }
}
