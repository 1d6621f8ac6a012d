//! Derives the wallet balance from a list of transactions.

use crate::model::{Amount, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a balance is classified for display.
///
/// A balance of exactly zero is classified as `Negative`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Positive,
    Negative,
}

serde_plain::derive_display_from_serialize!(Sign);
serde_plain::derive_fromstr_from_deserialize!(Sign);

/// The signed sum of income minus outcome over some transactions.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Balance(Amount);

impl Balance {
    /// Sums `transactions`, adding income and subtracting outcome. Nothing is cached; call this
    /// again whenever the list changes.
    pub fn of(transactions: &[Transaction]) -> Self {
        let total = transactions
            .iter()
            .fold(Decimal::ZERO, |acc, t| match t.kind() {
                TransactionType::Income => acc + t.value().value(),
                TransactionType::Outcome => acc - t.value().value(),
            });
        Self(Amount::new(total))
    }

    /// The signed total.
    pub fn total(&self) -> Decimal {
        self.0.value()
    }

    /// `abs(total)` with two decimals and a comma separator, e.g. `70,25`.
    pub fn magnitude(&self) -> String {
        self.0.magnitude()
    }

    pub fn sign(&self) -> Sign {
        if self.0.is_positive() {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}
