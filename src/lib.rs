mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod history;
pub mod model;
pub mod prompt;
mod utils;

#[cfg(test)]
mod test;

pub use api::{Mode, TestWallet, TestWalletState, Wallet, TEST_MODE_ENV};
pub use config::Config;
pub use error::{ApiError, Error, Result};
