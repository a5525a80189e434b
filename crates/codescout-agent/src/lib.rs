//! Codescout Agent - the conversation loop
//!
//! Owns the message history and drives the model: stream a completion,
//! execute any requested tool calls through the gateway, feed the bounded
//! envelopes back, repeat until the model stops asking for tools.

pub mod prompts;
pub mod runtime;
pub mod session;

pub use prompts::system_prompt;
pub use runtime::{AgentConfig, AgentError, AgentEvent, AgentRuntime};
pub use session::Session;
