//! The transaction history screen.
//!
//! `HistoryView` holds a snapshot of the user's transactions, keeps it in step with the wallet
//! API, derives the balance from it, and coordinates confirmed deletes. The snapshot is always
//! replaced wholesale by whatever the server last returned; nothing is merged.

use crate::api::Wallet;
use crate::error::ApiError;
use crate::model::{Balance, Session, Sign, Transaction, TransactionId, TransactionType};
use crate::prompt::Prompt;
use crate::Result;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::{debug, error, info, trace, warn};

pub const DELETE_CONFIRMATION: &str = "Deseja deletar esta transação?";
pub const DELETE_FAILED: &str = "Não foi possível deletar a transação";
pub const EMPTY_HISTORY: &str = "Não há registros de entrada ou saída";
const BALANCE_LABEL: &str = "SALDO";
const CURRENCY: &str = "R$";

/// The steps of a single delete.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
enum DeleteState {
    #[default]
    Idle,
    Confirming,
    Deleting,
    Resolved,
    Failed,
}

serde_plain::derive_display_from_serialize!(DeleteState);

/// How a call to `HistoryView::delete` ended.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user said no. Nothing was sent.
    Declined,
    /// The server deleted the transaction and returned `remaining` transactions.
    Deleted { remaining: usize },
    /// The request failed. The snapshot is unchanged and the user has been notified.
    Failed(ApiError),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}

/// The history screen of one signed-in user.
pub struct HistoryView {
    wallet: Box<dyn Wallet + Send>,
    session: Session,
    transactions: Vec<Transaction>,
    /// Toggled after every successful delete; the fetcher runs whenever it differs from
    /// `fetched_for`.
    refresh: bool,
    fetched_for: Option<bool>,
    delete_state: DeleteState,
}

impl HistoryView {
    /// Creates an unmounted view with an empty snapshot.
    pub fn new(wallet: Box<dyn Wallet + Send>, session: Session) -> Self {
        Self {
            wallet,
            session,
            transactions: Vec::new(),
            refresh: false,
            fetched_for: None,
            delete_state: DeleteState::Idle,
        }
    }

    /// Loads the snapshot for the first time.
    pub async fn mount(&mut self) -> std::result::Result<(), ApiError> {
        self.sync().await.map(|_| ())
    }

    /// Runs the fetcher if the view has never fetched or the refresh flag has toggled since the
    /// last fetch. Returns whether a fetch was attempted.
    pub async fn sync(&mut self) -> std::result::Result<bool, ApiError> {
        if self.fetched_for == Some(self.refresh) {
            trace!("History is up to date");
            return Ok(false);
        }
        self.fetch().await.map(|_| true)
    }

    /// Replaces the snapshot with the server's list. On failure the error is logged and returned
    /// and the previous snapshot is kept.
    pub async fn fetch(&mut self) -> std::result::Result<usize, ApiError> {
        self.fetched_for = Some(self.refresh);
        match self.wallet.history().await {
            Ok(transactions) => {
                debug!("Fetched {} transactions", transactions.len());
                self.transactions = transactions;
                Ok(self.transactions.len())
            }
            Err(e) => {
                warn!(
                    "Unable to fetch the transaction history, keeping the {} transactions already \
                    shown: {e}",
                    self.transactions.len()
                );
                Err(e)
            }
        }
    }

    /// Asks for confirmation and, if given, deletes transaction `id`.
    ///
    /// The snapshot only changes when the server confirms the delete, and then it becomes exactly
    /// the list the server returned. The id is not checked against the snapshot first. After a
    /// successful delete the refresh flag toggles so that the next `sync` re-fetches.
    pub async fn delete(
        &mut self,
        id: &TransactionId,
        prompt: &mut (dyn Prompt + Send),
    ) -> DeleteOutcome {
        self.transition(DeleteState::Confirming);
        let confirmed = match prompt.confirm(DELETE_CONFIRMATION).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Treating the unanswered confirmation as a 'no': {e:#}");
                false
            }
        };
        if !confirmed {
            debug!("Delete of transaction {id} declined");
            self.transition(DeleteState::Idle);
            return DeleteOutcome::Declined;
        }

        self.transition(DeleteState::Deleting);
        let outcome = match self.wallet.delete(id).await {
            Ok(transactions) => {
                self.transition(DeleteState::Resolved);
                info!("Deleted transaction {id}");
                let remaining = transactions.len();
                self.session.set_transactions(transactions.clone());
                self.transactions = transactions;
                self.refresh = !self.refresh;
                DeleteOutcome::Deleted { remaining }
            }
            Err(e) => {
                self.transition(DeleteState::Failed);
                error!("Unable to delete transaction {id}: {e}");
                if let Err(alert_error) = prompt.alert(DELETE_FAILED).await {
                    warn!("Unable to show the failure notice: {alert_error:#}");
                }
                DeleteOutcome::Failed(e)
            }
        };
        self.transition(DeleteState::Idle);
        outcome
    }

    /// Asks the user whether to sign out and, if so, forgets the session and the snapshot.
    /// Nothing is sent to the server. Returns whether the user signed out.
    pub async fn logout(&mut self, prompt: &mut (dyn Prompt + Send)) -> Result<bool> {
        let question = format!("Deseja sair da sua conta, {}?", self.session.name());
        if !prompt.confirm(&question).await? {
            return Ok(false);
        }
        info!("Signing out {}", self.session.name());
        self.session.clear();
        self.transactions.clear();
        Ok(true)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The balance of the current snapshot, computed afresh.
    pub fn balance(&self) -> Balance {
        Balance::of(&self.transactions)
    }

    pub fn refresh_flag(&self) -> bool {
        self.refresh
    }

    /// Builds what the screen shows for the current snapshot.
    pub fn render(&self) -> HistoryReport {
        let board = if self.transactions.is_empty() {
            Board::Empty {
                message: EMPTY_HISTORY.to_string(),
            }
        } else {
            let balance = self.balance();
            Board::Transactions {
                rows: self.transactions.iter().map(Row::from).collect(),
                footer: Footer {
                    label: BALANCE_LABEL.to_string(),
                    amount: format!("{CURRENCY} {}", balance.magnitude()),
                    sign: balance.sign(),
                },
            }
        };
        HistoryReport {
            greeting: format!("Olá, {}", self.session.name()),
            board,
        }
    }

    fn transition(&mut self, to: DeleteState) {
        trace!("Delete state {} -> {}", self.delete_state, to);
        self.delete_state = to;
    }
}

/// Everything the history screen displays.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct HistoryReport {
    greeting: String,
    board: Board,
}

impl HistoryReport {
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Board {
    Empty { message: String },
    Transactions { rows: Vec<Row>, footer: Footer },
}

/// One line of the history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Row {
    pub id: TransactionId,
    pub date: String,
    pub description: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl From<&Transaction> for Row {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id().clone(),
            date: t.date().to_string(),
            description: t.description().to_string(),
            value: t.value().to_string(),
            kind: t.kind(),
        }
    }
}

/// The balance line under the history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Footer {
    pub label: String,
    pub amount: String,
    pub sign: Sign,
}

impl Display for HistoryReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.greeting)?;
        match &self.board {
            Board::Empty { message } => writeln!(f, "{message}"),
            Board::Transactions { rows, footer } => {
                for row in rows {
                    writeln!(
                        f,
                        "{:<6} {:<32} {:>12} {:<7} [{}]",
                        row.date, row.description, row.value, row.kind, row.id
                    )?;
                }
                writeln!(
                    f,
                    "{:<39} {:>12} {}",
                    footer.label, footer.amount, footer.sign
                )
            }
        }
    }
}
