#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use batch_mint::{ChainClient, Connector, FeeSnapshot, MintError, Quote};
use core_logic::ChainConfig;
use ethers::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

// Well-known dev-chain keys, never funded on a real network.
pub const KEY_A: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY_B: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const KEY_C: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";

pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const CHAIN_ID: u64 = 42161;

pub fn secrets(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn contract() -> Address {
    CONTRACT.parse().unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Confirm,
    QuoteFails,
    BroadcastFails,
    Revert,
    BalanceFails,
}

#[derive(Debug)]
struct NodeState {
    behaviour: Behaviour,
    price: U256,
    next_hash: AtomicU64,
    quotes: AtomicU64,
    sends: Mutex<Vec<(Address, U256)>>,
    balances: HashMap<Address, U256>,
    send_gate: Option<Barrier>,
}

/// In-memory stand-in for an RPC node. Clones share state.
#[derive(Debug, Clone)]
pub struct MockNode {
    state: Arc<NodeState>,
}

impl MockNode {
    pub fn new(behaviour: Behaviour) -> Self {
        Self::with_balances(behaviour, HashMap::new())
    }

    pub fn with_balances(behaviour: Behaviour, balances: HashMap<Address, U256>) -> Self {
        Self {
            state: Arc::new(NodeState {
                behaviour,
                price: U256::from(1_000_000_000_000_000u64),
                next_hash: AtomicU64::new(1),
                quotes: AtomicU64::new(0),
                sends: Mutex::new(Vec::new()),
                balances,
                send_gate: None,
            }),
        }
    }

    /// Every broadcast blocks until `parties` broadcasts are in flight at once.
    pub fn gated(parties: usize) -> Self {
        Self {
            state: Arc::new(NodeState {
                behaviour: Behaviour::Confirm,
                price: U256::from(1_000_000_000_000_000u64),
                next_hash: AtomicU64::new(1),
                quotes: AtomicU64::new(0),
                sends: Mutex::new(Vec::new()),
                balances: HashMap::new(),
                send_gate: Some(Barrier::new(parties)),
            }),
        }
    }

    pub fn price(&self) -> U256 {
        self.state.price
    }

    pub fn quote_calls(&self) -> u64 {
        self.state.quotes.load(Ordering::SeqCst)
    }

    /// `(sender, value)` of every accepted broadcast.
    pub fn sends(&self) -> Vec<(Address, U256)> {
        self.state.sends.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockNode {
    async fn chain_id(&self) -> Result<u64> {
        Ok(CHAIN_ID)
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        if self.state.behaviour == Behaviour::BalanceFails {
            anyhow::bail!("connection reset");
        }
        Ok(self
            .state
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default())
    }

    async fn fee_snapshot(&self) -> Result<FeeSnapshot> {
        Ok(FeeSnapshot {
            gas_price: U256::from(10_000_000u64),
            base_fee: Some(U256::from(10_000_000u64)),
        })
    }

    async fn quote_batch_mint(
        &self,
        contract: Address,
        _mint_id: U256,
        amount: U256,
    ) -> Result<Quote, MintError> {
        self.state.quotes.fetch_add(1, Ordering::SeqCst);
        if self.state.behaviour == Behaviour::QuoteFails {
            return Err(MintError::Quote {
                contract,
                reason: "execution reverted".to_string(),
            });
        }
        let fee = self.state.price / U256::from(10u64);
        Ok(Quote {
            total_cost_with_fee: self.state.price * amount + fee,
            fee_amount: fee,
        })
    }

    async fn send_batch_mint(
        &self,
        signer: &LocalWallet,
        _contract: Address,
        _amount: U256,
        _mint_id: U256,
        value: U256,
    ) -> Result<TxHash, MintError> {
        if self.state.behaviour == Behaviour::BroadcastFails {
            return Err(MintError::Broadcast {
                reason: "insufficient funds".to_string(),
            });
        }
        if let Some(gate) = &self.state.send_gate {
            gate.wait().await;
        }
        tokio::task::yield_now().await;
        self.state
            .sends
            .lock()
            .unwrap()
            .push((signer.address(), value));
        let n = self.state.next_hash.fetch_add(1, Ordering::SeqCst);
        Ok(TxHash::from_low_u64_be(n))
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<u64, MintError> {
        tokio::task::yield_now().await;
        if self.state.behaviour == Behaviour::Revert {
            return Err(MintError::Reverted {
                tx_hash,
                block_number: 100,
            });
        }
        Ok(100 + tx_hash.to_low_u64_be())
    }
}

/// Hands out clones of one [`MockNode`] and counts connections.
#[derive(Debug, Clone)]
pub struct MockConnector {
    pub node: MockNode,
    connects: Arc<AtomicU64>,
    fail: bool,
}

impl MockConnector {
    pub fn new(node: MockNode) -> Self {
        Self {
            node,
            connects: Arc::new(AtomicU64::new(0)),
            fail: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Self::new(MockNode::new(Behaviour::Confirm))
        }
    }

    pub fn connects(&self) -> u64 {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Client = MockNode;

    async fn connect(&self, _chain: &ChainConfig) -> Result<MockNode> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("Failed to reach node");
        }
        Ok(self.node.clone())
    }
}
