//! Node access for the minter.
//!
//! Everything the mint pipeline needs from the network goes through
//! [`ChainClient`]; [`ChainConnection`] is the JSON-RPC implementation.

use crate::error::MintError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{ChainConfig, GasConfig};
use ethers::prelude::*;
use std::sync::Arc;
use tracing::{info, warn};

ethers::contract::abigen!(
    BatchMinter,
    r#"[
        function quoteBatchMint(uint256 mintId, uint256 amount) view returns (uint256 totalCostWithFee, uint256 feeAmount)
        function batchMint(uint256 amount, uint256 mintId) payable returns (uint256 totalCostWithFee)
    ]"#
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub total_cost_with_fee: U256,
    pub fee_amount: U256,
}

/// Fee figures read at connect time. Never applied to transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSnapshot {
    pub gas_price: U256,
    pub base_fee: Option<U256>,
}

impl FeeSnapshot {
    /// `base_fee * multiplier` plus the fixed tip, if the chain reports a base fee.
    pub fn suggested_max_fee(&self, gas: &GasConfig) -> Option<U256> {
        self.base_fee.map(|base| {
            base.saturating_mul(U256::from(gas.multiplier_percent())) / U256::from(100u64)
                + U256::from(gas.priority_fee_wei)
        })
    }
}

/// Full-precision gwei rendering for log lines.
pub fn format_gwei(wei: U256) -> String {
    ethers::utils::format_units(wei, "gwei").unwrap_or_else(|_| format!("{} wei", wei))
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;

    async fn balance(&self, address: Address) -> Result<U256>;

    async fn fee_snapshot(&self) -> Result<FeeSnapshot>;

    async fn quote_batch_mint(
        &self,
        contract: Address,
        mint_id: U256,
        amount: U256,
    ) -> Result<Quote, MintError>;

    /// Broadcasts `batchMint(amount, mintId)` carrying `value`, returning as
    /// soon as the node accepts it.
    async fn send_batch_mint(
        &self,
        signer: &LocalWallet,
        contract: Address,
        amount: U256,
        mint_id: U256,
        value: U256,
    ) -> Result<TxHash, MintError>;

    /// Waits for the receipt and returns its block number.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<u64, MintError>;
}

/// HTTP JSON-RPC connection to one chain.
#[derive(Clone, Debug)]
pub struct ChainConnection {
    provider: Provider<Http>,
    config: ChainConfig,
}

impl ChainConnection {
    pub fn new(config: ChainConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .with_context(|| format!("Invalid RPC URL {}", config.rpc_url))?;
        Ok(Self { provider, config })
    }

    /// Builds the provider and checks the node's chain id against the config.
    pub async fn connect(config: ChainConfig) -> Result<Self> {
        let connection = Self::new(config)?;
        let remote_id = connection
            .chain_id()
            .await
            .with_context(|| format!("Failed to reach {}", connection.config.rpc_url))?;

        info!(
            "Connected to network: {} (Chain ID: {})",
            connection.config.name, remote_id
        );
        if remote_id != connection.config.chain_id {
            warn!(
                "Node reports chain ID {} but config expects {}; signing with {}",
                remote_id, connection.config.chain_id, connection.config.chain_id
            );
        }

        Ok(connection)
    }
}

#[async_trait]
impl ChainClient for ChainConnection {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chainid().await?.as_u64())
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address, None).await?)
    }

    async fn fee_snapshot(&self) -> Result<FeeSnapshot> {
        let gas_price = self.provider.get_gas_price().await?;
        let block = self.provider.get_block(BlockNumber::Latest).await?;

        Ok(FeeSnapshot {
            gas_price,
            base_fee: block.and_then(|b| b.base_fee_per_gas),
        })
    }

    async fn quote_batch_mint(
        &self,
        contract: Address,
        mint_id: U256,
        amount: U256,
    ) -> Result<Quote, MintError> {
        let minter = BatchMinter::new(contract, Arc::new(self.provider.clone()));
        let (total_cost_with_fee, fee_amount) = minter
            .quote_batch_mint(mint_id, amount)
            .call()
            .await
            .map_err(|e| MintError::Quote {
                contract,
                reason: e.to_string(),
            })?;

        Ok(Quote {
            total_cost_with_fee,
            fee_amount,
        })
    }

    async fn send_batch_mint(
        &self,
        signer: &LocalWallet,
        contract: Address,
        amount: U256,
        mint_id: U256,
        value: U256,
    ) -> Result<TxHash, MintError> {
        let client = Arc::new(SignerMiddleware::new(self.provider.clone(), signer.clone()));
        let minter = BatchMinter::new(contract, client);

        // Type 0 envelope; gas limit and price are left to the node.
        let call = minter.batch_mint(amount, mint_id).value(value).legacy();
        let pending = call.send().await.map_err(|e| MintError::Broadcast {
            reason: e.to_string(),
        })?;

        Ok(pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<u64, MintError> {
        let receipt = PendingTransaction::new(tx_hash, &self.provider)
            .await
            .map_err(|e| MintError::Confirmation {
                tx_hash,
                reason: e.to_string(),
            })?;

        confirmed_block(tx_hash, receipt)
    }
}

/// Interprets a receipt: missing means dropped, status 0 means reverted.
pub fn confirmed_block(
    tx_hash: TxHash,
    receipt: Option<TransactionReceipt>,
) -> Result<u64, MintError> {
    let receipt = receipt.ok_or(MintError::Dropped { tx_hash })?;
    let block_number = receipt
        .block_number
        .ok_or_else(|| MintError::Confirmation {
            tx_hash,
            reason: "receipt has no block number".to_string(),
        })?
        .as_u64();

    if receipt.status == Some(U64::zero()) {
        return Err(MintError::Reverted {
            tx_hash,
            block_number,
        });
    }

    Ok(block_number)
}
