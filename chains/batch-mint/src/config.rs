use anyhow::{Context, Result};
use config::{Config, File};
use core_logic::{ChainConfig, ConfigError};
use url::Url;
use ethers::types::Address;
use serde::Deserialize;

pub const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";
pub const DEFAULT_FAN_OUT: u32 = 10;
/// 2025-01-15 16:59:59 UTC
pub const DEFAULT_TARGET_TIMESTAMP_MS: i64 = 1_736_960_399_000;

#[derive(Debug, Deserialize, Clone)]
pub struct MintSettings {
    /// Falls back to the `CONTRACT_ADDRESS` environment entry.
    #[serde(default)]
    pub contract_address: Option<String>,
    pub amount: u64,
    pub mint_id: u64,
    /// Unused by the contract call; carried for parity with the mint UI.
    pub affiliate: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DispatchSettings {
    /// Concurrent attempts per account per iteration.
    pub fan_out: u32,
    /// Unix milliseconds; dispatch waits until then when it is in the future.
    pub target_timestamp_ms: i64,
    /// Keys are read from `<key_prefix>_1`, `<key_prefix>_2`, ...
    pub key_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MintConfig {
    pub chain: ChainConfig,
    pub mint: MintSettings,
    pub dispatch: DispatchSettings,
}

impl MintConfig {
    /// Defaults, then `path` if it exists, then `CONTRACT_ADDRESS` from the environment.
    pub fn load(path: &str) -> Result<Self> {
        let config = Self::builder(path, std::env::var(CONTRACT_ADDRESS_ENV).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn builder(path: &str, contract_env: Option<String>) -> Result<Self> {
        let chain = ChainConfig::default();

        let settings = Config::builder()
            .set_default("chain.name", chain.name)?
            .set_default("chain.chain_id", chain.chain_id)?
            .set_default("chain.currency", chain.currency)?
            .set_default("chain.rpc_url", chain.rpc_url)?
            .set_default("chain.explorer_url", chain.explorer_url)?
            .set_default("chain.gas_multiplier", chain.gas_multiplier)?
            .set_default("mint.amount", 1_i64)?
            .set_default("mint.mint_id", 3_i64)?
            .set_default("mint.affiliate", format!("{:?}", Address::zero()))?
            .set_default("dispatch.fan_out", i64::from(DEFAULT_FAN_OUT))?
            .set_default("dispatch.target_timestamp_ms", DEFAULT_TARGET_TIMESTAMP_MS)?
            .set_default("dispatch.key_prefix", "PRIVATE_KEY")?
            .add_source(File::with_name(path).required(false))
            .set_override_option(
                "mint.contract_address",
                contract_env.filter(|v| !v.trim().is_empty()),
            )?
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rpc_ok = Url::parse(&self.chain.rpc_url)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !rpc_ok {
            return Err(ConfigError::InvalidRpcUrl {
                url: self.chain.rpc_url.clone(),
            });
        }

        if !(self.chain.gas_multiplier > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "chain.gas_multiplier".to_string(),
                reason: format!("must be positive, got {}", self.chain.gas_multiplier),
            });
        }

        if self.dispatch.fan_out == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.fan_out".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.dispatch.key_prefix.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "dispatch.key_prefix".to_string(),
            });
        }

        self.contract_address()?;
        parse_address("mint.affiliate", &self.mint.affiliate)?;

        Ok(())
    }

    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        let raw = self
            .mint
            .contract_address
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField {
                field: format!("mint.contract_address (or {})", CONTRACT_ADDRESS_ENV),
            })?;
        parse_address("mint.contract_address", raw)
    }

    pub fn affiliate(&self) -> Result<Address, ConfigError> {
        parse_address("mint.affiliate", &self.mint.affiliate)
    }
}

fn parse_address(field: &str, raw: &str) -> Result<Address, ConfigError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{}' is not an address: {}", raw, e),
        })
}
