//! Error taxonomy for codescout
//!
//! Every failure a tool call can hit maps onto one of these variants. The
//! execution gateway converts them into error envelopes; nothing here is
//! allowed to escape to the orchestrating agent as a raw error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The user declined the approval prompt. Terminal for the call,
    /// recoverable for the session.
    #[error("tool call aborted by user")]
    Aborted,

    /// A resolved path left the project root. Hard error, never clamped.
    #[error("access denied: path '{path}' is outside project root '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// A filter query ran before the tag index was generated. The message
    /// tells the agent how to recover.
    #[error("no tag index found at '{0}' - run the generate_tags action first")]
    IndexMissing(PathBuf),

    /// A subprocess could not be started at all. A started process that
    /// exits non-zero is not an error.
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("invalid tool arguments: {0}")]
    InvalidArgs(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            command: command.into(),
            source,
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    pub fn path_escape(path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self::PathEscape {
            path: path.into(),
            root: root.into(),
        }
    }
}
