use crate::chain::ChainClient;
use anyhow::{Context, Result};
use core_logic::{SecretKey, SecretSource, WalletError, WalletManager};
use ethers::prelude::*;
use futures::future::try_join_all;
use tracing::info;

/// A signing account bound to one chain id.
#[derive(Clone, Debug)]
pub struct Account {
    index: usize,
    wallet: LocalWallet,
}

impl Account {
    pub fn from_key(index: usize, key: &SecretKey, chain_id: u64) -> Result<Self, WalletError> {
        let wallet = key
            .expose()
            .parse::<LocalWallet>()
            .map_err(|_| WalletError::InvalidKeyFormat {
                name: key.name().to_string(),
            })?;

        Ok(Self {
            index,
            wallet: wallet.with_chain_id(chain_id),
        })
    }

    /// Zero-based position in discovery order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    pub fn signer(&self) -> &LocalWallet {
        &self.wallet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    pub address: Address,
    pub balance: U256,
}

#[derive(Debug, Clone)]
pub struct AccountPool {
    accounts: Vec<Account>,
}

impl AccountPool {
    /// Loads `<prefix>_1..=<prefix>_n` from `source`. Fails when none exist.
    pub fn load<S: SecretSource + ?Sized>(source: &S, prefix: &str, chain_id: u64) -> Result<Self> {
        let manager = WalletManager::load(source, prefix)?;

        let accounts = manager
            .keys()
            .iter()
            .enumerate()
            .map(|(index, key)| Account::from_key(index, key, chain_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { accounts })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Queries every native balance concurrently; output follows load order.
    pub async fn check_balances<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        currency: &str,
    ) -> Result<Vec<AccountBalance>> {
        let balances = try_join_all(self.accounts.iter().map(|account| async move {
            let address = account.address();
            let balance = client
                .balance(address)
                .await
                .with_context(|| format!("Failed to fetch balance for {:?}", address))?;
            Ok::<_, anyhow::Error>(AccountBalance { address, balance })
        }))
        .await?;

        info!("Wallet Balances:");
        for entry in &balances {
            info!(
                "{:?}: {} {}",
                entry.address,
                ethers::utils::format_ether(entry.balance),
                currency
            );
        }

        Ok(balances)
    }
}
