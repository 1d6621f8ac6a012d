//! Implements the `Wallet` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a wallet server.

use crate::api::Wallet;
use crate::error::ApiError;
use crate::model::{Amount, Transaction, TransactionId, TransactionType};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The server-side state held by a `TestWallet`, along with a record of the calls made to it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TestWalletState {
    /// What the "server" currently stores.
    pub transactions: Vec<Transaction>,
    /// When set, every call fails with `ApiError::Unavailable`.
    pub offline: bool,
    /// How many times `history` was called.
    pub history_calls: usize,
    /// The ids passed to `delete`, in order.
    pub delete_calls: Vec<TransactionId>,
}

impl TestWalletState {
    /// The total number of requests the "server" received.
    pub fn request_count(&self) -> usize {
        self.history_calls + self.delete_calls.len()
    }
}

/// An implementation of the `Wallet` trait that does not use the network. Clones share the same
/// state, so a test can keep a handle while the view owns a boxed copy.
#[derive(Debug, Clone)]
pub struct TestWallet {
    state: Arc<Mutex<TestWalletState>>,
}

impl TestWallet {
    /// Create a new `TestWallet` whose server holds `transactions`.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TestWalletState {
                transactions,
                ..TestWalletState::default()
            })),
        }
    }

    /// A copy of the current state.
    pub async fn state(&self) -> TestWalletState {
        self.state.lock().await.clone()
    }

    /// Simulate the server going down (`true`) or coming back (`false`).
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }

    /// Replace what the server stores, e.g. to simulate another device adding a record.
    pub async fn set_transactions(&self, transactions: Vec<Transaction>) {
        self.state.lock().await.transactions = transactions;
    }
}

#[async_trait::async_trait]
impl Wallet for TestWallet {
    async fn history(&mut self) -> Result<Vec<Transaction>, ApiError> {
        let mut state = self.state.lock().await;
        state.history_calls += 1;
        if state.offline {
            return Err(ApiError::Unavailable("GET /history".to_string()));
        }
        Ok(state.transactions.clone())
    }

    async fn delete(&mut self, id: &TransactionId) -> Result<Vec<Transaction>, ApiError> {
        let mut state = self.state.lock().await;
        state.delete_calls.push(id.clone());
        if state.offline {
            return Err(ApiError::Unavailable(format!("DELETE /delete/{id}")));
        }
        // Deleting an unknown id is not an error; the server just returns what it has.
        state.transactions.retain(|t| t.id() != id);
        Ok(state.transactions.clone())
    }
}

impl Default for TestWallet {
    /// Seeds the wallet with the records from this module.
    fn default() -> Self {
        Self::new(default_data())
    }
}

/// Seed transaction data.
fn default_data() -> Vec<Transaction> {
    [
        ("tx01", TransactionType::Income, 350000, "Salário", "05/10"),
        ("tx02", TransactionType::Outcome, 120000, "Aluguel", "06/10"),
        ("tx03", TransactionType::Outcome, 38743, "Mercado", "08/10"),
        ("tx04", TransactionType::Outcome, 675, "Padaria", "09/10"),
        ("tx05", TransactionType::Income, 25050, "Freela", "12/10"),
        ("tx06", TransactionType::Outcome, 8999, "Internet", "15/10"),
    ]
    .into_iter()
    .map(|(id, kind, cents, description, date)| {
        Transaction::new(
            id,
            kind,
            Amount::new(Decimal::new(cents, 2)),
            description,
            date,
        )
    })
    .collect()
}
