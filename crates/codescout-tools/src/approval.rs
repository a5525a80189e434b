//! Approval capability
//!
//! The gateway never reads the console directly; it talks to an
//! [`ApprovalSource`] so a non-interactive or remote front end can plug in
//! the same state machine. The interactive source reads one line from
//! stdin: empty input means yes, anything not starting with `y` means no.

use crate::console::{Console, Tint};

#[async_trait::async_trait]
pub trait ApprovalSource: Send + Sync {
    /// Show the pending call (intention plus tool parameters) to whoever
    /// decides.
    async fn present(&self, description: &[String]);

    /// Block until a decision is made. `Ok(false)` declines the call.
    async fn await_decision(&self) -> std::io::Result<bool>;
}

/// Terminal approval: prints the description and blocks on stdin.
pub struct InteractiveApproval {
    console: Console,
}

impl InteractiveApproval {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

#[async_trait::async_trait]
impl ApprovalSource for InteractiveApproval {
    async fn present(&self, description: &[String]) {
        for line in description {
            if line.is_empty() {
                continue;
            }
            self.console.line(Tint::Cyan, line);
        }
        self.console.inline(Tint::Cyan, "run this tool call? [Y/n] ");
    }

    async fn await_decision(&self) -> std::io::Result<bool> {
        // Unbounded wait by design: a stalled session simply waits for the
        // human. spawn_blocking keeps the runtime responsive meanwhile.
        let answer = tokio::task::spawn_blocking(|| {
            let mut input = String::new();
            std::io::stdin().read_line(&mut input).map(|_| input)
        })
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))??;

        let trimmed = answer.trim();
        Ok(trimmed.is_empty() || trimmed.starts_with('y') || trimmed.starts_with('Y'))
    }
}

/// Pre-authorized policy: always answers the same way. Used by `--yes`
/// mode and by tests that must prove a declined call has no side effects.
pub struct PolicyApproval {
    allow: bool,
}

impl PolicyApproval {
    pub fn allow_all() -> Self {
        Self { allow: true }
    }

    pub fn deny_all() -> Self {
        Self { allow: false }
    }
}

#[async_trait::async_trait]
impl ApprovalSource for PolicyApproval {
    async fn present(&self, _description: &[String]) {}

    async fn await_decision(&self) -> std::io::Result<bool> {
        Ok(self.allow)
    }
}
