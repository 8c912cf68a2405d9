//! # Core Logic - Shared Utilities for Chain Bots
//!
//! This crate provides the chain-agnostic pieces used by the chain crates:
//! configuration, key loading, logging, fee arithmetic and the iteration
//! supervisor.
//!
//! ## Modules
//!
//! - [`config`] - Network configuration shared by chain crates
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Core trait definitions
//! - `utils` - Wallet loading, logging, gas helpers, supervisor loop

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::ChainConfig;
pub use error::{ConfigError, CoreError, WalletError};
pub use traits::{Iteration, IterationStats};

pub use utils::{
    setup_logger, GasConfig, ProcessEnv, SecretKey, SecretSource, StopPolicy,
    Supervisor, SupervisorReport, WalletManager, DEFAULT_PRIORITY_FEE_WEI,
};
