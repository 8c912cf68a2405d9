//! # Core Logic - Gas Configuration
//!
//! Chain-agnostic fee arithmetic. Chain crates read the raw values from
//! their node and use this to derive display figures.

/// Fixed tip used when deriving an EIP-1559 ceiling (1.5 Mwei).
pub const DEFAULT_PRIORITY_FEE_WEI: u64 = 1_500_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasConfig {
    pub multiplier: f64,
    pub priority_fee_wei: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            multiplier: 1.5,
            priority_fee_wei: DEFAULT_PRIORITY_FEE_WEI,
        }
    }
}

impl GasConfig {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier,
            ..Default::default()
        }
    }

    /// Multiplier as whole percent, truncated (1.5 -> 150, 1.234 -> 123).
    pub fn multiplier_percent(&self) -> u64 {
        if self.multiplier <= 0.0 {
            return 0;
        }
        (self.multiplier * 100.0).floor() as u64
    }
}
