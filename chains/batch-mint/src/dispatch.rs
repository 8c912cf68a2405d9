use crate::accounts::AccountPool;
use crate::chain::ChainClient;
use crate::error::MintError;
use crate::mint::{quote_and_mint, AttemptResult, MintRequest};
use core_logic::{ChainConfig, IterationStats};
use ethers::types::Address;
use futures::future::join_all;
use tracing::{error, info};

/// How one attempt settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The operation returned, successfully or with a post-broadcast failure.
    Fulfilled(AttemptResult),
    /// The operation failed before a transaction hash existed.
    Rejected(MintError),
}

/// One settled attempt, tagged with the account and attempt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub account_index: usize,
    pub address: Address,
    /// 1-based within the account's fan-out.
    pub attempt: u32,
    pub settlement: Settlement,
}

impl AttemptReport {
    /// Rejections fold into `Failed` without a hash.
    pub fn result(&self) -> AttemptResult {
        match &self.settlement {
            Settlement::Fulfilled(result) => result.clone(),
            Settlement::Rejected(e) => AttemptResult::Failed {
                tx_hash: None,
                reason: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(&self.settlement, Settlement::Fulfilled(r) if r.is_success())
    }
}

/// Launches `fan_out` concurrent quote-and-mint attempts per account, all at
/// once, and waits for every one of them to settle.
#[derive(Debug, Clone, Copy)]
pub struct DispatchScheduler {
    fan_out: u32,
}

impl DispatchScheduler {
    pub fn new(fan_out: u32) -> Self {
        Self { fan_out }
    }

    /// Reports come back in launch order: account by account, attempts ascending.
    pub async fn dispatch<C: ChainClient + ?Sized>(
        &self,
        client: &C,
        pool: &AccountPool,
        request: &MintRequest,
        chain: &ChainConfig,
    ) -> Vec<AttemptReport> {
        let mut attempts = Vec::with_capacity(pool.len() * self.fan_out as usize);
        for account in pool.accounts() {
            for attempt in 1..=self.fan_out {
                attempts.push(async move {
                    let address = account.address();
                    let settlement = match quote_and_mint(client, account, request, chain).await {
                        Ok(result) => Settlement::Fulfilled(result),
                        Err(e) => {
                            error!(
                                "Failed minting for wallet {:?} (attempt {}): {}",
                                address, attempt, e
                            );
                            Settlement::Rejected(e)
                        }
                    };

                    AttemptReport {
                        account_index: account.index(),
                        address,
                        attempt,
                        settlement,
                    }
                });
            }
        }

        let reports = join_all(attempts).await;

        for report in &reports {
            log_report(report);
        }

        reports
    }
}

fn log_report(report: &AttemptReport) {
    match report.result() {
        AttemptResult::Success { tx_hash, .. } => info!(
            "Success for wallet {:?} (attempt {}): {:?}",
            report.address, report.attempt, tx_hash
        ),
        AttemptResult::Failed { reason, .. } => info!(
            "Failed for wallet {:?} (attempt {}): {}",
            report.address, report.attempt, reason
        ),
    }
}

pub fn summarize(reports: &[AttemptReport]) -> IterationStats {
    let success = reports.iter().filter(|r| r.is_success()).count() as u64;
    IterationStats {
        success,
        failed: reports.len() as u64 - success,
    }
}
