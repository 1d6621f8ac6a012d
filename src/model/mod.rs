//! Types that represent the core data model, such as `Transaction` and `Balance`.
mod amount;
mod balance;
mod session;
mod transaction;

pub use amount::{Amount, AmountError};
pub use balance::{Balance, Sign};
pub use session::Session;
pub use transaction::{HistoryResponse, Transaction, TransactionId, TransactionType};
