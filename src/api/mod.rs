//! The `Wallet` trait abstracts the remote wallet API so that the history screen can be driven by
//! either the real HTTP service or an in-memory stand-in.

mod http_wallet;
mod test_wallet;

use crate::error::ApiError;
use crate::model::{Transaction, TransactionId};
use crate::Config;
use async_trait::async_trait;
use tracing::debug;

pub(crate) use http_wallet::HttpWallet;
pub use test_wallet::{TestWallet, TestWalletState};

/// When this environment variable is set and non-empty, the binary talks to a `TestWallet`
/// instead of the network.
pub const TEST_MODE_ENV: &str = "MYWALLET_IN_TEST_MODE";

/// The remote operations the history screen needs. Every call is authenticated with the bearer
/// token the implementation was built with.
#[async_trait]
pub trait Wallet {
    /// `GET /history`: the full list of the user's transactions.
    async fn history(&mut self) -> Result<Vec<Transaction>, ApiError>;

    /// `DELETE /delete/{id}`: deletes one transaction and returns the updated full list.
    async fn delete(&mut self, id: &TransactionId) -> Result<Vec<Transaction>, ApiError>;
}

/// Selects which `Wallet` implementation the binary uses.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Talk to the wallet API over HTTP.
    #[default]
    Http,
    /// Use the seeded in-memory `TestWallet`.
    Test,
}

impl Mode {
    /// Returns `Mode::Test` when `MYWALLET_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Mode::Http`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

/// Creates the `Wallet` for `mode`, authenticated with the session stored in `config`.
pub(crate) fn wallet(config: &Config, mode: Mode) -> Box<dyn Wallet + Send> {
    match mode {
        Mode::Http => {
            debug!("Using the wallet API at {}", config.api_url());
            Box::new(HttpWallet::new(
                config.api_url().clone(),
                config.session().token(),
            ))
        }
        Mode::Test => {
            debug!("Using the in-memory test wallet");
            Box::new(TestWallet::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_is_http() {
        assert_eq!(Mode::default(), Mode::Http);
    }
}
