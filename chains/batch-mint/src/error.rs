//! Errors raised by a single quote-and-mint attempt.

use ethers::types::{Address, TxHash};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    /// `quoteBatchMint` failed; nothing was broadcast.
    #[error("Quote failed for contract {contract:?}: {reason}")]
    Quote { contract: Address, reason: String },

    /// The node refused the `batchMint` transaction (or filling it failed).
    #[error("Broadcast rejected: {reason}")]
    Broadcast { reason: String },

    #[error("Transaction {tx_hash:?} reverted in block {block_number}")]
    Reverted { tx_hash: TxHash, block_number: u64 },

    #[error("Transaction {tx_hash:?} was dropped before confirmation")]
    Dropped { tx_hash: TxHash },

    #[error("Confirmation failed for {tx_hash:?}: {reason}")]
    Confirmation { tx_hash: TxHash, reason: String },
}
