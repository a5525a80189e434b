//! Terminal command execution
//!
//! Commands carrying shell metacharacters go through `sh -c`; anything
//! else is tokenized on whitespace and executed directly, so a plain
//! `rg pattern src` never pays for a shell. A non-zero exit is a normal
//! outcome: the captured output is what the caller wants either way.

use super::RawResult;
use codescout_core::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

const SHELL_METACHARS: &[char] = &['|', '&', ';', '<', '>', '(', ')', '$', '`', '"', '\'', '*', '?', '[', ']', '~', '{', '}'];

/// True if the command needs shell interpretation.
fn needs_shell(command: &str) -> bool {
    command.contains(SHELL_METACHARS)
}

pub async fn run(command: &str, working_dir: &Path) -> Result<RawResult> {
    info!(
        "terminal: '{}' in {} (shell={})",
        command,
        working_dir.display(),
        needs_shell(command)
    );

    let mut cmd = if needs_shell(command) {
        let mut sh = Command::new("sh");
        sh.arg("-c").arg(command);
        sh
    } else {
        let mut tokens = command.split_whitespace();
        let program = tokens
            .next()
            .ok_or_else(|| Error::invalid_args("command must not be empty"))?;
        let mut direct = Command::new(program);
        direct.args(tokens);
        direct
    };

    let output = cmd
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| Error::launch(command.to_string(), e))?;

    if !output.status.success() {
        info!("terminal: '{}' exited with {}", command, output.status);
    }

    // stdout first, then stderr, both line-split.
    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    lines.extend(
        String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(str::to_string),
    );

    Ok(RawResult::new(lines))
}
