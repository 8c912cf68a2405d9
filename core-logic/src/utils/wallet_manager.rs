use crate::error::{ConfigError, CoreError, WalletError};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Where numbered secret entries are looked up.
pub trait SecretSource: Send + Sync {
    fn secret(&self, name: &str) -> Option<String>;
}

/// Reads secrets from the process environment (populated from `.env` by `dotenv`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl SecretSource for ProcessEnv {
    fn secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl SecretSource for HashMap<String, String> {
    fn secret(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Raw private key text. Wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    name: String,
    key: String,
}

impl SecretKey {
    /// Name of the entry this key was read from, e.g. `PRIVATE_KEY_2`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expose(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("name", &self.name)
            .field("key", &"***REDACTED***")
            .finish()
    }
}

/// Ordered set of signing keys read from `PREFIX_1`, `PREFIX_2`, ...
///
/// Discovery stops at the first missing or blank entry, so `PREFIX_4` is
/// ignored when `PREFIX_3` is absent.
#[derive(Debug)]
pub struct WalletManager {
    prefix: String,
    keys: Vec<SecretKey>,
}

impl WalletManager {
    pub fn load<S: SecretSource + ?Sized>(source: &S, prefix: &str) -> Result<Self, CoreError> {
        let mut keys = Vec::new();

        for index in 1.. {
            let name = format!("{}_{}", prefix, index);
            let Some(raw) = source.secret(&name) else {
                break;
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                break;
            }

            validate_key(&name, trimmed)?;
            debug!("[WalletManager] Found {}", name);
            keys.push(SecretKey {
                name,
                key: trimmed.to_string(),
            });
        }

        if keys.is_empty() {
            return Err(ConfigError::NoWallets {
                prefix: prefix.to_string(),
            }
            .into());
        }

        info!("Loaded {} wallets", keys.len());

        Ok(Self {
            prefix: prefix.to_string(),
            keys,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the number of available wallets
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[SecretKey] {
        &self.keys
    }

    /// List entry names without exposing key material
    pub fn list_wallets(&self) -> Vec<String> {
        self.keys.iter().map(|k| k.name.clone()).collect()
    }
}

fn validate_key(name: &str, key: &str) -> Result<(), WalletError> {
    let hex_part = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);

    if hex_part.len() != 64 {
        return Err(WalletError::InvalidKeyLength {
            name: name.to_string(),
            length: hex_part.len(),
        });
    }

    hex::decode(hex_part).map_err(|_| WalletError::InvalidKeyFormat {
        name: name.to_string(),
    })?;

    Ok(())
}
