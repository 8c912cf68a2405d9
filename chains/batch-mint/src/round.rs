//! One full mint round: connect, load accounts, report balances, wait for
//! the trigger, then dispatch every attempt.

use crate::accounts::AccountPool;
use crate::chain::{format_gwei, ChainClient, ChainConnection};
use crate::config::MintConfig;
use crate::dispatch::{summarize, AttemptReport, DispatchScheduler};
use crate::mint::MintRequest;
use crate::trigger::TimedTrigger;
use anyhow::Result;
use async_trait::async_trait;
use core_logic::{ChainConfig, GasConfig, Iteration, IterationStats, SecretSource};
use tracing::{info, warn};

/// Opens a fresh chain client for each round.
#[async_trait]
pub trait Connector: Send + Sync {
    type Client: ChainClient;

    async fn connect(&self, chain: &ChainConfig) -> Result<Self::Client>;
}

/// Connects over HTTP JSON-RPC.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

#[async_trait]
impl Connector for HttpConnector {
    type Client = ChainConnection;

    async fn connect(&self, chain: &ChainConfig) -> Result<ChainConnection> {
        ChainConnection::connect(chain.clone()).await
    }
}

pub struct MintRound<K, S> {
    config: MintConfig,
    connector: K,
    secrets: S,
    request: MintRequest,
    scheduler: DispatchScheduler,
    trigger: TimedTrigger,
}

impl<K: Connector, S: SecretSource> MintRound<K, S> {
    pub fn new(config: MintConfig, connector: K, secrets: S) -> Result<Self> {
        let request = MintRequest::from_config(&config)?;
        let scheduler = DispatchScheduler::new(config.dispatch.fan_out);
        let trigger = TimedTrigger::new(config.dispatch.target_timestamp_ms);

        Ok(Self {
            config,
            connector,
            secrets,
            request,
            scheduler,
            trigger,
        })
    }

    pub async fn execute(&self) -> Result<Vec<AttemptReport>> {
        let chain = &self.config.chain;
        let client = self.connector.connect(chain).await?;

        match client.fee_snapshot().await {
            Ok(snapshot) => {
                let gas = GasConfig::new(chain.gas_multiplier);
                info!(
                    "Gas price: {} gwei, base fee: {}",
                    format_gwei(snapshot.gas_price),
                    snapshot
                        .base_fee
                        .map(|b| format!("{} gwei", format_gwei(b)))
                        .unwrap_or_else(|| "n/a".to_string())
                );
                if let Some(max_fee) = snapshot.suggested_max_fee(&gas) {
                    info!(
                        "Suggested max fee ({}x + tip): {} gwei",
                        gas.multiplier,
                        format_gwei(max_fee)
                    );
                }
            }
            Err(e) => warn!("Could not read fee data: {:#}", e),
        }

        let prefix = &self.config.dispatch.key_prefix;
        let pool = AccountPool::load(&self.secrets, prefix, chain.chain_id)?;
        pool.check_balances(&client, &chain.currency).await?;

        self.trigger.wait().await;

        info!("Starting minting process for all wallets...");
        let reports = self
            .scheduler
            .dispatch(&client, &pool, &self.request, chain)
            .await;
        info!("Minting completed for {} attempts", reports.len());

        Ok(reports)
    }
}

#[async_trait]
impl<K: Connector, S: SecretSource> Iteration for MintRound<K, S> {
    async fn run_once(&self, _iteration: u64) -> Result<IterationStats> {
        let reports = self.execute().await?;
        Ok(summarize(&reports))
    }
}
