//! # Batch Mint
//!
//! Fires a burst of payable `batchMint` calls from every configured account
//! at a fixed moment, then repeats.
//!
//! ## Modules
//!
//! - [`config`] - Layered configuration (defaults, TOML file, environment)
//! - [`chain`] - Node access behind the [`chain::ChainClient`] trait
//! - [`accounts`] - Signing accounts loaded from `PRIVATE_KEY_<n>`
//! - [`mint`] - The quote-then-mint operation for one attempt
//! - [`dispatch`] - Concurrent fan-out across accounts
//! - [`trigger`] - Wait until the configured timestamp
//! - [`round`] - One complete round, run repeatedly by the supervisor

pub mod accounts;
pub mod chain;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mint;
pub mod round;
pub mod trigger;

pub use accounts::{Account, AccountBalance, AccountPool};
pub use chain::{ChainClient, ChainConnection, FeeSnapshot, Quote};
pub use config::MintConfig;
pub use dispatch::{AttemptReport, DispatchScheduler, Settlement};
pub use error::MintError;
pub use mint::{quote_and_mint, AttemptResult, MintRequest};
pub use round::{Connector, HttpConnector, MintRound};
pub use trigger::TimedTrigger;
