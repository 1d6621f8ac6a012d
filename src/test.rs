//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Amount, Session, Transaction, TransactionType};
use crate::prompt::Prompt;
use crate::{Config, Result};
use anyhow::bail;
use std::collections::VecDeque;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up a mywallet home directory with a Config for a signed-in user.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment signed in as "Ana" against a placeholder API URL.
    pub async fn new() -> Self {
        Self::with_api_url("https://wallet.example.com").await
    }

    /// Creates a test environment signed in as "Ana" against `api_url`.
    pub async fn with_api_url(api_url: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("mywallet");
        let session = Session::new("Ana", "ana@example.com", "test-token");
        let config = Config::create(&root, api_url, session).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }
}

/// A `Prompt` that answers from a script and records everything it was asked. Running out of
/// answers is an error.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    questions: Vec<String>,
    alerts: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

#[async_trait::async_trait]
impl Prompt for ScriptedPrompt {
    async fn confirm(&mut self, message: &str) -> Result<bool> {
        self.questions.push(message.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("No scripted answer for '{message}'"),
        }
    }

    async fn alert(&mut self, message: &str) -> Result<()> {
        self.alerts.push(message.to_string());
        Ok(())
    }
}

/// Builds a transaction with a placeholder description and date.
pub fn tx(id: &str, kind: TransactionType, value: &str) -> Transaction {
    Transaction::new(id, kind, Amount::from_str(value).unwrap(), "test", "01/01")
}
