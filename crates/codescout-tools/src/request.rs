//! Typed tool requests
//!
//! The agent's function-calling protocol hands us a tool name plus loose
//! JSON arguments. Everything is normalized here into one closed enum, one
//! variant per tool kind, with every path already resolved through the
//! project-root sandbox. The gateway dispatches on the variant; there is no
//! per-tool type hierarchy.

use codescout_core::{safe_join, Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Directory names excluded from scans unless the caller widens the net.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".DS_Store",
    "node_modules",
    "bower_components",
    "dist",
    "build",
    "env",
    "venv",
    ".venv",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".cache",
    ".idea",
    ".vscode",
    "vendor",
    "out",
    "target",
    ".bundle",
    "coverage",
    "bin",
    "nuget",
    ".nuget",
];

/// How a symbol parameter matches tag names. Replaces the old convention
/// where a literal `"."` silently meant "anything".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolPattern {
    Wildcard,
    Exact(String),
    Regex(String),
}

impl SymbolPattern {
    /// `"."` and the empty string are wildcard sentinels for compatibility
    /// with how models tend to fill optional parameters.
    pub fn parse(symbol: &str, is_regex: bool) -> Self {
        let trimmed = symbol.trim();
        if trimmed.is_empty() || trimmed == "." {
            Self::Wildcard
        } else if is_regex {
            Self::Regex(trimmed.to_string())
        } else {
            Self::Exact(trimmed.to_string())
        }
    }
}

impl std::fmt::Display for SymbolPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wildcard => write!(f, "*"),
            Self::Exact(s) => write!(f, "{}", s),
            Self::Regex(r) => write!(f, "/{}/", r),
        }
    }
}

#[derive(Clone, Debug)]
pub enum TagsAction {
    Generate,
    Filter {
        symbol: SymbolPattern,
        kind: Option<String>,
    },
}

#[derive(Clone, Debug)]
pub enum ToolRequest {
    Directory {
        path: PathBuf,
        max_depth: Option<u32>,
        exclude_dirs: Vec<String>,
        file_filter: Option<String>,
        hide_empty_folder: bool,
    },
    Tags {
        action: TagsAction,
        path: PathBuf,
    },
    Terminal {
        command: String,
        working_dir: PathBuf,
    },
    ReadFile {
        path: PathBuf,
    },
    WriteFile {
        path: PathBuf,
        content: String,
    },
}

fn str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    str_arg(args, key).ok_or_else(|| Error::invalid_args(format!("missing required parameter: {}", key)))
}

/// Glob filters may arrive as bare extensions (".py"); widen to a pattern.
fn normalize_filter(filter: &str) -> String {
    if let Some(ext) = filter.strip_prefix('.') {
        format!("*.{}", ext)
    } else {
        filter.to_string()
    }
}

impl ToolRequest {
    /// Build a typed request from the agent's (name, arguments) pair.
    /// Every path is sandboxed against `project_root` here, before any
    /// approval or execution happens; escapes are hard errors.
    pub fn parse(name: &str, args: &Value, project_root: &Path) -> Result<Self> {
        match name {
            "directory" => {
                let path = safe_join(project_root, str_arg(args, "path").unwrap_or("."))?;
                let max_depth = args.get("max_depth").and_then(Value::as_i64).and_then(|d| {
                    // Negative means unbounded, same as absent.
                    u32::try_from(d).ok()
                });
                let mut exclude_dirs: Vec<String> =
                    DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect();
                if let Some(extra) = args.get("additional_exclude_dirs").and_then(Value::as_array) {
                    exclude_dirs.extend(extra.iter().filter_map(Value::as_str).map(str::to_string));
                }
                let file_filter = str_arg(args, "file_filter")
                    .filter(|f| !f.trim().is_empty())
                    .map(normalize_filter);
                let hide_empty_folder = args
                    .get("hide_empty_folder")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                Ok(Self::Directory {
                    path,
                    max_depth,
                    exclude_dirs,
                    file_filter,
                    hide_empty_folder,
                })
            }
            "tags" => {
                let path = safe_join(project_root, str_arg(args, "path").unwrap_or("."))?;
                let action = match required_str(args, "action")? {
                    "generate_tags" => TagsAction::Generate,
                    "filter" => {
                        let is_regex = args
                            .get("is_symbol_regex")
                            .and_then(Value::as_bool)
                            .unwrap_or(false);
                        let symbol = SymbolPattern::parse(str_arg(args, "symbol").unwrap_or(""), is_regex);
                        let kind = str_arg(args, "kind")
                            .map(str::trim)
                            .filter(|k| !k.is_empty())
                            .map(str::to_string);
                        TagsAction::Filter { symbol, kind }
                    }
                    other => {
                        return Err(Error::invalid_args(format!(
                            "unknown tags action '{}', expected 'generate_tags' or 'filter'",
                            other
                        )))
                    }
                };
                Ok(Self::Tags { action, path })
            }
            "terminal" => {
                let command = required_str(args, "command")?.to_string();
                if command.trim().is_empty() {
                    return Err(Error::invalid_args("command must not be empty"));
                }
                let working_dir = safe_join(project_root, str_arg(args, "working_dir").unwrap_or("."))?;
                Ok(Self::Terminal {
                    command,
                    working_dir,
                })
            }
            "read_file" => {
                let path = safe_join(project_root, required_str(args, "path")?)?;
                Ok(Self::ReadFile { path })
            }
            "write_file" => {
                let path = safe_join(project_root, required_str(args, "path")?)?;
                let content = required_str(args, "content")?.to_string();
                Ok(Self::WriteFile { path, content })
            }
            other => Err(Error::invalid_args(format!("unknown tool: {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Directory { .. } => "directory",
            Self::Tags { .. } => "tags",
            Self::Terminal { .. } => "terminal",
            Self::ReadFile { .. } => "read_file",
            Self::WriteFile { .. } => "write_file",
        }
    }

    /// True if approving this call can change the project tree or spawn a
    /// process.
    pub fn is_side_effecting(&self) -> bool {
        matches!(
            self,
            Self::Terminal { .. } | Self::WriteFile { .. } | Self::Tags { action: TagsAction::Generate, .. }
        )
    }

    /// Human-readable description shown at the approval prompt.
    pub fn describe(&self, limit: usize) -> Vec<String> {
        match self {
            Self::Directory {
                path,
                max_depth,
                exclude_dirs,
                file_filter,
                hide_empty_folder,
            } => {
                let mut lines = vec![
                    "Query directory".to_string(),
                    format!("path: {}", path.display()),
                    format!("limit: {} entries (summarized if above)", limit),
                ];
                if let Some(depth) = max_depth {
                    lines.push(format!("max_depth: {}", depth));
                }
                lines.push(format!("exclude_dirs: {} names", exclude_dirs.len()));
                if let Some(filter) = file_filter {
                    lines.push(format!("file_filter: {}", filter));
                }
                if *hide_empty_folder {
                    lines.push("hide_empty_folder: true".to_string());
                }
                lines
            }
            Self::Tags { action, path } => match action {
                TagsAction::Generate => vec![
                    "Generate tag index".to_string(),
                    format!("path: {}", path.display()),
                ],
                TagsAction::Filter { symbol, kind } => vec![
                    "Query tag index".to_string(),
                    format!("path: {}", path.display()),
                    format!("symbol: {}", symbol),
                    format!("kind: {}", kind.as_deref().unwrap_or("*")),
                ],
            },
            Self::Terminal {
                command,
                working_dir,
            } => vec![
                "Run terminal command".to_string(),
                format!("command: {}", command),
                format!("working_dir: {}", working_dir.display()),
                format!("limit: {} lines (summarized if above)", limit),
            ],
            Self::ReadFile { path } => vec![
                "Read file".to_string(),
                format!("path: {}", path.display()),
            ],
            Self::WriteFile { path, content } => vec![
                "Write file".to_string(),
                format!("path: {}", path.display()),
                format!("content: {} bytes", content.len()),
            ],
        }
    }
}
