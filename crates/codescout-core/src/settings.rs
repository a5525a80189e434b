//! Session-wide settings
//!
//! Environment variables provide the baseline, CLI flags override. The
//! project root is canonicalized once here so the path sandbox can work
//! lexically everywhere else.

use crate::error::{Error, Result};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_RESULT_LIMIT: usize = 100;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute root of the tree being explored; all tool paths resolve
    /// against and are confined to this directory.
    pub project_root: PathBuf,
    /// Maximum items a tool result may carry before truncation and
    /// summarization kick in. Always > 0.
    pub limit: usize,
    /// Echo every returned item to the console.
    pub verbose: bool,
    pub model: String,
    pub api_key: String,
}

impl Settings {
    /// Read the environment baseline. `ANTHROPIC_API_KEY` is required;
    /// `CODESCOUT_MODEL` and `CODESCOUT_ROOT` are optional.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::Config("ANTHROPIC_API_KEY environment variable is required".into()))?;
        let model = std::env::var("CODESCOUT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let project_root = std::env::var("CODESCOUT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Ok(Self {
            project_root,
            limit: DEFAULT_RESULT_LIMIT,
            verbose: false,
            model,
            api_key,
        })
    }

    /// Validate and canonicalize. Fails if the root does not exist or the
    /// limit is zero.
    pub fn resolved(mut self) -> Result<Self> {
        if self.limit == 0 {
            return Err(Error::Config("tools-result-limit must be greater than zero".into()));
        }
        self.project_root = self.project_root.canonicalize().map_err(|e| {
            Error::Config(format!(
                "project root '{}' is not accessible: {}",
                self.project_root.display(),
                e
            ))
        })?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(root: PathBuf) -> Settings {
        Settings {
            project_root: root,
            limit: DEFAULT_RESULT_LIMIT,
            verbose: false,
            model: DEFAULT_MODEL.to_string(),
            api_key: "test-key".to_string(),
        }
    }

    #[test]
    fn resolved_canonicalizes_root() {
        let dir = tempfile::tempdir().unwrap();
        let settings = base(dir.path().to_path_buf()).resolved().unwrap();
        assert!(settings.project_root.is_absolute());
    }

    #[test]
    fn resolved_rejects_zero_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = base(dir.path().to_path_buf());
        settings.limit = 0;
        assert!(matches!(settings.resolved(), Err(Error::Config(_))));
    }

    #[test]
    fn resolved_rejects_missing_root() {
        let settings = base(PathBuf::from("/definitely/not/a/real/path"));
        assert!(matches!(settings.resolved(), Err(Error::Config(_))));
    }
}
