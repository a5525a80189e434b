//! Codescout Tools - the bounded tool-execution framework
//!
//! Five tools (directory scan, tag index, terminal, file read, file write)
//! behind one execution gateway that enforces human approval, serialized
//! console access, size-bounded envelopes, and summarization fallback.
//! The gateway is the only entry point the agent layer uses; individual
//! tool functions in `tools/` carry no policy of their own.

pub mod approval;
pub mod console;
pub mod gateway;
pub mod request;
pub mod schema;
pub mod tools;

pub use approval::{ApprovalSource, InteractiveApproval, PolicyApproval};
pub use console::{Console, Tint};
pub use gateway::Gateway;
pub use request::{SymbolPattern, TagsAction, ToolRequest};
pub use schema::tool_definitions;
pub use tools::RawResult;
