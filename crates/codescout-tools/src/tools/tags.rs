//! Symbol index via universal-ctags / readtags
//!
//! The index lives in a `tags` file at the scanned root (next to a single
//! indexed file) and is regenerated on demand; staleness is the caller's
//! problem. Both binaries are driven as subprocesses and their
//! tab-separated output is scraped, not owned: filter results are returned
//! as raw tag lines, with [`SymbolTag::parse`] offered as convenience only.

use super::RawResult;
use crate::request::{SymbolPattern, TagsAction};
use codescout_core::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, warn};

/// Where the tag index for `path` lives: inside a directory, or next to a
/// single indexed file.
pub fn tags_file_for(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join("tags")
    } else {
        path.parent().unwrap_or(Path::new(".")).join("tags")
    }
}

pub async fn run(path: &Path, action: &TagsAction) -> Result<RawResult> {
    match action {
        TagsAction::Generate => generate(path).await,
        TagsAction::Filter { symbol, kind } => filter(path, symbol, kind.as_deref()).await,
    }
}

/// Build or refresh the tag index. Side effect only; the envelope is empty.
async fn generate(path: &Path) -> Result<RawResult> {
    let tags_file = tags_file_for(path);

    if path.is_dir() && path.join(".git").exists() {
        // Respect the repository: index only version-controlled files.
        let listing = capture("git", &["ls-files"], Some(path), None).await?;
        info!(
            "generating tag index at {} from {} tracked files",
            tags_file.display(),
            listing.lines().count()
        );
        capture(
            "ctags",
            &["-f", &tags_file.to_string_lossy(), "-L", "-"],
            Some(path),
            Some(listing),
        )
        .await?;
    } else if path.is_dir() {
        info!("generating tag index at {} (recursive)", tags_file.display());
        capture(
            "ctags",
            &["-R", "-f", &tags_file.to_string_lossy(), &path.to_string_lossy()],
            None,
            None,
        )
        .await?;
    } else {
        info!("generating tag index for single file {}", path.display());
        capture(
            "ctags",
            &["-f", &tags_file.to_string_lossy(), &path.to_string_lossy()],
            None,
            None,
        )
        .await?;
    }

    Ok(RawResult::empty())
}

/// Query a pre-existing tag index. Absence of the index is the recoverable
/// precondition error, never an empty success.
async fn filter(path: &Path, symbol: &SymbolPattern, kind: Option<&str>) -> Result<RawResult> {
    let tags_file = tags_file_for(path);
    if !tags_file.exists() {
        return Err(Error::IndexMissing(tags_file));
    }

    let tags_arg = tags_file.to_string_lossy().into_owned();
    let mut args: Vec<String> = vec![
        "-t".into(),
        tags_arg,
        "-e".into(),
        "-n".into(),
    ];

    let kind_expr = kind.map(|k| format!("(eq? $kind \"{}\")", sanitize_kind(k)));

    // Query construction, most specific first; exact-name lookups stay
    // case-insensitive, regexes go through readtags filter expressions.
    match (symbol, kind_expr) {
        (SymbolPattern::Regex(r), Some(kexpr)) => {
            args.push("-Q".into());
            args.push(format!("(and (#/{}/ $name) {})", escape_regex(r), kexpr));
            args.push("-l".into());
        }
        (SymbolPattern::Regex(r), None) => {
            args.push("-Q".into());
            args.push(format!("(#/{}/ $name)", escape_regex(r)));
            args.push("-l".into());
        }
        (SymbolPattern::Wildcard, Some(kexpr)) => {
            args.push("-Q".into());
            args.push(kexpr);
            args.push("-l".into());
        }
        (SymbolPattern::Exact(name), Some(kexpr)) => {
            args.push("-Q".into());
            args.push(kexpr);
            args.push("-i".into());
            args.push(name.clone());
        }
        (SymbolPattern::Exact(name), None) => {
            args.push("-i".into());
            args.push(name.clone());
        }
        (SymbolPattern::Wildcard, None) => {
            args.push("-l".into());
        }
    }

    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = capture("readtags", &arg_refs, None, None).await?;

    let lines: Vec<String> = output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect();
    Ok(RawResult::new(lines))
}

/// Kind codes are single alphanumeric characters; strip anything else so
/// the filter expression cannot be broken out of.
fn sanitize_kind(kind: &str) -> String {
    kind.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

fn escape_regex(regex: &str) -> String {
    regex.replace('/', "\\/")
}

/// Spawn a process and capture stdout. Only a failed launch is an error;
/// a non-zero exit is logged and whatever stdout exists is returned.
async fn capture(
    program: &str,
    args: &[&str],
    current_dir: Option<&Path>,
    stdin_data: Option<String>,
) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = current_dir {
        cmd.current_dir(dir);
    }
    if stdin_data.is_some() {
        cmd.stdin(Stdio::piped());
    }

    let rendered = format!("{} {}", program, args.join(" "));
    let mut child = cmd
        .spawn()
        .map_err(|e| Error::launch(rendered.clone(), e))?;

    if let (Some(data), Some(mut stdin)) = (stdin_data, child.stdin.take()) {
        stdin.write_all(data.as_bytes()).await?;
        drop(stdin);
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        warn!(
            "'{}' exited with {}: {}",
            rendered,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Structured view of one tag line. Optional convenience; the envelope
/// carries the raw lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTag {
    pub symbol: String,
    pub file: String,
    pub pattern: String,
    pub kind: String,
    pub line: u64,
}

impl SymbolTag {
    /// Parse a readtags line: `SYMBOL\tFILE\t/pattern/;"\tkind:x\tline:n`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split('\t');
        let symbol = parts.next()?.to_string();
        let file = parts.next()?.to_string();
        let pattern = parts.next()?.to_string();

        let mut kind = String::new();
        let mut line_number = 0;
        for field in parts {
            if let Some(k) = field.strip_prefix("kind:") {
                kind = k.to_string();
            } else if let Some(n) = field.strip_prefix("line:") {
                line_number = n.trim().parse().unwrap_or(0);
            }
        }

        Some(Self {
            symbol,
            file,
            pattern,
            kind,
            line: line_number,
        })
    }
}
