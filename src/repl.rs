//! The interactive loop
//!
//! One turn at a time: read a line, run the agent, stream its text in
//! green, then print the token-usage line. Tool prompts and completion
//! lines are printed by the gateway while the turn runs.

use crate::commands::{self, Command};
use codescout_agent::{AgentEvent, AgentRuntime};
use codescout_core::Settings;
use codescout_llm::Usage;
use codescout_tools::{Console, Tint};
use console::style;
use std::io::Write;
use tokio::sync::mpsc;

pub async fn run(runtime: AgentRuntime, console: Console, settings: &Settings) -> anyhow::Result<()> {
    console.line(
        Tint::Plain,
        &format!(
            "exploring {} with {} (limit {} items per tool result)",
            settings.project_root.display(),
            settings.model,
            settings.limit
        ),
    );
    console.line(Tint::Plain, "ask about the codebase, or /help for commands");

    let mut last_usage = Usage::default();
    loop {
        console.separator();
        console.inline(Tint::Plain, "");
        let Some(input) = read_line().await? else {
            break;
        };
        let input = input.trim().to_string();
        if input.is_empty() {
            continue;
        }

        match commands::parse(&input) {
            Some(Command::Exit) => break,
            Some(Command::Help) => {
                for line in commands::HELP {
                    console.line(Tint::Plain, line);
                }
                continue;
            }
            Some(Command::AddContext(text)) => {
                if text.is_empty() {
                    console.line(Tint::Red, "usage: /add-context <text>");
                } else {
                    runtime.session().add_context("the user", &text).await;
                    console.line(Tint::Green, "context added");
                }
                continue;
            }
            Some(Command::Unknown(name)) => {
                console.line(Tint::Red, &format!("unknown command {}, try /help", name));
                continue;
            }
            None => {}
        }

        let (tx, rx) = mpsc::channel::<AgentEvent>(256);
        let printer = print_events(rx, &console, &mut last_usage);
        let (turn, _) = tokio::join!(runtime.run_turn(&input, tx), printer);
        if let Err(e) = turn {
            console.line(Tint::Red, &format!("turn failed: {}", e));
        }
    }

    console.line(Tint::Plain, "bye");
    Ok(())
}

async fn read_line() -> anyhow::Result<Option<String>> {
    let result = tokio::task::spawn_blocking(|| {
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).map(|n| (n, input))
    })
    .await??;
    // Zero bytes read means EOF (Ctrl-D).
    Ok((result.0 > 0).then_some(result.1))
}

async fn print_events(
    mut rx: mpsc::Receiver<AgentEvent>,
    console: &Console,
    last_usage: &mut Usage,
) {
    let mut mid_text = false;
    while let Some(event) = rx.recv().await {
        match event {
            AgentEvent::Text(text) => {
                print!("{}", style(text).green());
                let _ = std::io::stdout().flush();
                mid_text = true;
            }
            AgentEvent::ToolCallStart { name, .. } => {
                if mid_text {
                    println!();
                    mid_text = false;
                }
                console.line(Tint::Yellow, &format!("assistant requests tool: {}", name));
            }
            AgentEvent::ToolExecuting { .. } | AgentEvent::ToolResult { .. } => {
                // The gateway prints the approval prompt and completion line.
            }
            AgentEvent::Done { usage, .. } => {
                if mid_text {
                    println!();
                    mid_text = false;
                }
                let sent = usage.input_tokens - last_usage.input_tokens;
                let received = usage.output_tokens - last_usage.output_tokens;
                *last_usage = usage;
                console.line(
                    Tint::Blue,
                    &format!(
                        "tokens: {} sent, {} received ({} cumulative)",
                        sent,
                        received,
                        usage.total()
                    ),
                );
            }
            AgentEvent::Error(e) => {
                if mid_text {
                    println!();
                    mid_text = false;
                }
                console.line(Tint::Red, &e);
            }
        }
    }
}
