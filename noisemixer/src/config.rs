//! Configuration for the mixer.
//!
//! Besides the trie configuration, the mixer needs the deposit admission
//! policy:
//! - `denomination`: the only accepted deposit amount, in octas
//!   (default: 10,000,000 = 0.1 APT)
//! - `max_tx_age`: how old a deposit transfer may be when admitted (default: 5 minutes)
//! - `allowed_functions`: entry functions a deposit transfer may call

use chrono::Duration;
use noisetree::Config;

/// Default deposit amount in octas (0.1 APT).
pub const DENOMINATION: u64 = 10_000_000;

/// Default maximum age of a deposit transfer, in minutes.
pub const MAX_TX_AGE_MINUTES: i64 = 5;

/// Entry functions accepted as deposit transfers by default.
pub const DEFAULT_ALLOWED_FUNCTIONS: [&str; 3] = [
    "0x1::coin::transfer",
    "0x1::aptos_account::transfer",
    "0x9c19f31c0e121a67ef47a340c3d47d0f930df610b2ad9252c8b6885a9d67c753::whiteNoise::deposit",
];

#[derive(Debug, Clone)]
pub struct MixerConfig {
    /// Trie depth and node encoding
    pub trie: Config,
    /// Required deposit amount in octas
    pub denomination: u64,
    /// Maximum age of an admitted transfer
    pub max_tx_age: Duration,
    /// Entry functions a deposit transfer may call
    pub allowed_functions: Vec<String>,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            trie: Config::default(),
            denomination: DENOMINATION,
            max_tx_age: Duration::minutes(MAX_TX_AGE_MINUTES),
            allowed_functions: DEFAULT_ALLOWED_FUNCTIONS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

impl MixerConfig {
    pub fn from_trie_config(trie: Config) -> Self {
        MixerConfig {
            trie,
            ..MixerConfig::default()
        }
    }

    pub fn set_denomination(&mut self, denomination: u64) {
        self.denomination = denomination;
    }

    pub fn set_max_tx_age(&mut self, max_tx_age: Duration) {
        self.max_tx_age = max_tx_age;
    }

    pub fn allow_function(&mut self, function: &str) {
        if !self.allowed_functions.iter().any(|f| f == function) {
            self.allowed_functions.push(function.to_owned());
        }
    }
}
