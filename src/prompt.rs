//! The confirmation and notice dialogs the history screen raises.
//!
//! The screen never blocks on its own: it awaits a `Prompt`, and whatever drives the screen
//! decides how the question is answered (a terminal, a `--yes` flag, a test script).

use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

#[async_trait]
pub trait Prompt {
    /// Asks the user a yes/no question. Returns `true` only if the user accepted.
    async fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Shows a notice the user must acknowledge.
    async fn alert(&mut self, message: &str) -> Result<()>;
}

/// Asks questions on stderr and reads answers from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn confirm(&mut self, message: &str) -> Result<bool> {
        let mut stderr = tokio::io::stderr();
        stderr
            .write_all(format!("{message} [s/N] ").as_bytes())
            .await
            .context("Unable to write the confirmation prompt")?;
        stderr.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .context("Unable to read the confirmation answer")?;
        Ok(is_yes(&line))
    }

    async fn alert(&mut self, message: &str) -> Result<()> {
        let mut stderr = tokio::io::stderr();
        stderr
            .write_all(format!("{message}\n").as_bytes())
            .await
            .context("Unable to write the notice")?;
        Ok(())
    }
}

/// Answers every question the same way without asking. Notices go to the log.
#[derive(Debug, Clone, Copy)]
pub struct AutoPrompt {
    answer: bool,
}

impl AutoPrompt {
    pub fn new(answer: bool) -> Self {
        Self { answer }
    }
}

#[async_trait]
impl Prompt for AutoPrompt {
    async fn confirm(&mut self, message: &str) -> Result<bool> {
        info!("{message} {}", if self.answer { "sim" } else { "não" });
        Ok(self.answer)
    }

    async fn alert(&mut self, message: &str) -> Result<()> {
        warn!("{message}");
        Ok(())
    }
}

/// Accepts `s`, `sim`, `y` and `yes`, in any case.
fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
