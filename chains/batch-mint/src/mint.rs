use crate::accounts::Account;
use crate::chain::ChainClient;
use crate::config::MintConfig;
use crate::error::MintError;
use anyhow::Result;
use core_logic::ChainConfig;
use ethers::types::{Address, TxHash, U256};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintRequest {
    pub contract: Address,
    pub amount: U256,
    pub mint_id: U256,
    /// Never sent; `batchMint` takes no affiliate argument.
    pub affiliate: Address,
}

impl MintRequest {
    pub fn from_config(config: &MintConfig) -> Result<Self> {
        Ok(Self {
            contract: config.contract_address()?,
            amount: U256::from(config.mint.amount),
            mint_id: U256::from(config.mint.mint_id),
            affiliate: config.affiliate()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    Success {
        tx_hash: TxHash,
        block_number: u64,
    },
    Failed {
        tx_hash: Option<TxHash>,
        reason: String,
    },
}

impl AttemptResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptResult::Success { .. })
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            AttemptResult::Success { tx_hash, .. } => Some(*tx_hash),
            AttemptResult::Failed { tx_hash, .. } => *tx_hash,
        }
    }
}

/// Quotes the mint price, then broadcasts a payable `batchMint` for exactly
/// that amount and waits for the receipt.
///
/// Quote and broadcast failures are returned as `Err`. Once a hash exists the
/// attempt always resolves to `Ok`: a reverted, dropped or unconfirmable
/// transaction becomes [`AttemptResult::Failed`] carrying that hash.
pub async fn quote_and_mint<C: ChainClient + ?Sized>(
    client: &C,
    account: &Account,
    request: &MintRequest,
    chain: &ChainConfig,
) -> Result<AttemptResult, MintError> {
    let address = account.address();

    let quote = client
        .quote_batch_mint(request.contract, request.mint_id, request.amount)
        .await
        .inspect_err(|e| error!("Error in batch minting for wallet {:?}: {}", address, e))?;
    info!(
        "Total cost: {} {} (fee {})",
        ethers::utils::format_ether(quote.total_cost_with_fee),
        chain.currency,
        ethers::utils::format_ether(quote.fee_amount)
    );

    let tx_hash = client
        .send_batch_mint(
            account.signer(),
            request.contract,
            request.amount,
            request.mint_id,
            quote.total_cost_with_fee,
        )
        .await
        .inspect_err(|e| error!("Error in batch minting for wallet {:?}: {}", address, e))?;

    let hash_str = format!("{:?}", tx_hash);
    info!("Transaction hash: {}", hash_str);
    info!("View on block scanner: {}", chain.explorer_link(&hash_str));

    match client.wait_for_receipt(tx_hash).await {
        Ok(block_number) => {
            info!(
                "Transaction confirmed for wallet {:?}! Block number: {}",
                address, block_number
            );
            Ok(AttemptResult::Success {
                tx_hash,
                block_number,
            })
        }
        Err(e) => {
            error!("Transaction Failed for wallet {:?}: {}", address, e);
            Ok(AttemptResult::Failed {
                tx_hash: Some(tx_hash),
                reason: e.to_string(),
            })
        }
    }
}
