use serde::{Deserialize, Serialize};

/// Static network parameters shared by every component talking to one chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    /// Display symbol for native balances (e.g. "ETH", "BERA").
    pub currency: String,
    pub rpc_url: String,
    /// Transaction page prefix; the hash is appended verbatim.
    pub explorer_url: String,
    pub gas_multiplier: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: "Arbitrum One".to_string(),
            chain_id: 42161,
            currency: "ETH".to_string(),
            rpc_url: "https://arbitrum.llamarpc.com/".to_string(),
            explorer_url: "https://arbiscan.io/tx/".to_string(),
            gas_multiplier: 1.5,
        }
    }
}

impl ChainConfig {
    pub fn explorer_link(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_url, tx_hash)
    }
}
