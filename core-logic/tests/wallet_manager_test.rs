use core_logic::{ConfigError, CoreError, WalletError, WalletManager};
use std::collections::HashMap;

// Well-known dev-chain keys, never funded on a real network.
const KEY_A: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const KEY_B: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
const KEY_C: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";

fn source(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_loads_contiguous_entries_in_order() {
    let env = source(&[
        ("PRIVATE_KEY_1", KEY_A),
        ("PRIVATE_KEY_2", KEY_B),
        ("PRIVATE_KEY_3", KEY_C),
    ]);

    let manager = WalletManager::load(&env, "PRIVATE_KEY").unwrap();

    assert_eq!(manager.count(), 3);
    assert_eq!(
        manager.list_wallets(),
        vec!["PRIVATE_KEY_1", "PRIVATE_KEY_2", "PRIVATE_KEY_3"]
    );
    assert_eq!(manager.keys()[1].expose(), KEY_B);
}

#[test]
fn test_gap_stops_loading() {
    let env = source(&[
        ("PRIVATE_KEY_1", KEY_A),
        ("PRIVATE_KEY_2", KEY_B),
        ("PRIVATE_KEY_4", KEY_C),
        ("PRIVATE_KEY_5", KEY_C),
    ]);

    let manager = WalletManager::load(&env, "PRIVATE_KEY").unwrap();

    assert_eq!(manager.count(), 2);
}

#[test]
fn test_blank_entry_counts_as_gap() {
    let env = source(&[
        ("PRIVATE_KEY_1", KEY_A),
        ("PRIVATE_KEY_2", "   "),
        ("PRIVATE_KEY_3", KEY_C),
    ]);

    let manager = WalletManager::load(&env, "PRIVATE_KEY").unwrap();

    assert_eq!(manager.count(), 1);
}

#[test]
fn test_missing_first_entry_is_config_error() {
    let env = source(&[("PRIVATE_KEY_2", KEY_B)]);

    let err = WalletManager::load(&env, "PRIVATE_KEY").unwrap_err();

    assert!(matches!(
        err,
        CoreError::Config(ConfigError::NoWallets { ref prefix }) if prefix == "PRIVATE_KEY"
    ));
}

#[test]
fn test_custom_prefix() {
    let env = source(&[("MINTER_1", KEY_A), ("PRIVATE_KEY_1", KEY_B)]);

    let manager = WalletManager::load(&env, "MINTER").unwrap();

    assert_eq!(manager.count(), 1);
    assert_eq!(manager.prefix(), "MINTER");
    assert_eq!(manager.keys()[0].expose(), KEY_A);
}

#[test]
fn test_short_key_is_rejected() {
    let env = source(&[("PRIVATE_KEY_1", "0x1234")]);

    let err = WalletManager::load(&env, "PRIVATE_KEY").unwrap_err();

    assert!(matches!(
        err,
        CoreError::Wallet(WalletError::InvalidKeyLength { length: 4, .. })
    ));
}

#[test]
fn test_keys_are_trimmed() {
    let padded = format!("  {}\n", KEY_A);
    let env = source(&[("PRIVATE_KEY_1", padded.as_str())]);

    let manager = WalletManager::load(&env, "PRIVATE_KEY").unwrap();

    assert_eq!(manager.keys()[0].expose(), KEY_A);
}
