//! codescout — interactive codebase-exploration assistant
//!
//! Wires the pieces together: settings from env + flags, tracing to stderr
//! (and optionally a file), the Anthropic provider, the approval-gated tool
//! gateway, and the REPL.

mod commands;
mod repl;

use anyhow::Context;
use clap::Parser;
use codescout_agent::{system_prompt, AgentConfig, AgentRuntime};
use codescout_core::Settings;
use codescout_llm::{AnthropicProvider, LlmSummarizer};
use codescout_tools::{ApprovalSource, Console, Gateway, InteractiveApproval, PolicyApproval};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser)]
#[command(
    name = "codescout",
    about = "Explore a codebase in conversation, with human-approved tools",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Root of the project to explore
    #[arg(short, long, default_value = ".")]
    root_dir: PathBuf,

    /// Echo every tool result item to the console
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Maximum items per tool result before truncation + summarization
    #[arg(long)]
    tools_result_limit: Option<usize>,

    /// Model to use (or set CODESCOUT_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Write logs to a file in addition to stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Approve every tool call without prompting
    #[arg(short, long, default_value_t = false)]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file.as_deref())?;

    let mut settings = Settings::from_env()?;
    settings.project_root = cli.root_dir;
    settings.verbose = cli.verbose;
    if let Some(limit) = cli.tools_result_limit {
        settings.limit = limit;
    }
    if let Some(model) = cli.model {
        settings.model = model;
    }
    let settings = settings.resolved()?;

    let console = Console::new();
    let provider = Arc::new(AnthropicProvider::new(&settings.api_key));
    let summarizer = Arc::new(LlmSummarizer::new(provider.clone(), settings.model.clone()));

    let approval: Arc<dyn ApprovalSource> = if cli.yes {
        Arc::new(PolicyApproval::allow_all())
    } else {
        Arc::new(InteractiveApproval::new(console.clone()))
    };

    let gateway = Arc::new(
        Gateway::new(
            settings.project_root.clone(),
            settings.limit,
            approval,
            summarizer,
        )
        .with_verbose(settings.verbose)
        .with_console(console.clone()),
    );

    let config = AgentConfig {
        model: settings.model.clone(),
        system_prompt: system_prompt(&settings.project_root),
        ..AgentConfig::default()
    };
    let runtime = AgentRuntime::new(provider, gateway, config);

    repl::run(runtime, console, &settings).await
}

fn init_tracing(
    log_file: Option<&std::path::Path>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "codescout=info".into());

    // REPL output owns stdout; diagnostics go to stderr.
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let file = path
                .file_name()
                .context("log file path has no file name")?;
            let appender = tracing_appender::rolling::never(
                dir.unwrap_or_else(|| std::path::Path::new(".")),
                file,
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(stderr_layer.with_filter(env_filter))
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(stderr_layer.with_filter(env_filter))
                .init();
            Ok(None)
        }
    }
}
