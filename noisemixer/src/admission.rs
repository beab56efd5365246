//! Deposit admission.
//!
//! Before a secret commitment reaches the trie, the transfer that paid for it
//! must pass the admission policy: the transaction succeeded, called an allowed
//! entry function, moved exactly the denomination, is recent enough and has
//! not been used for a deposit before.
//!
//! Fetching the transaction from a chain indexer is left to the caller, which
//! hands the result in as a [`TransferRecord`].

use chrono::{DateTime, Duration, Utc};
use dashmap::DashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MixerConfig;

/// The facts about a deposit transfer that admission looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub tx_hash: String,
    pub success: bool,
    pub function: String,
    pub amount: u64,
    /// Transaction timestamp in microseconds since the Unix epoch
    pub timestamp_micros: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Transaction {0} already deposited")]
    AlreadyDeposited(String),

    #[error("Transaction {0} not successful")]
    TransactionFailed(String),

    #[error("Function {0} is not a valid transfer function")]
    FunctionNotAllowed(String),

    #[error("Wrong amount: expected/got = {expected}/{got}")]
    WrongAmount { expected: u64, got: u64 },

    #[error("Transaction too old: {age_secs}s, at most {max_secs}s allowed")]
    TooOld { age_secs: i64, max_secs: i64 },

    #[error("Invalid transaction timestamp {0}")]
    InvalidTimestamp(i64),

    #[error("Missing secret")]
    EmptySecret,
}

/// Transaction hashes that have already paid for a deposit.
#[derive(Debug, Default)]
pub struct DepositHistory {
    seen: DashSet<String>,
}

impl DepositHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tx_hash: &str) -> bool {
        self.seen.contains(tx_hash)
    }

    /// Records `tx_hash`, returning false if it was already recorded.
    pub fn record(&self, tx_hash: &str) -> bool {
        self.seen.insert(tx_hash.to_owned())
    }

    /// Forgets `tx_hash`, used when a deposit fails after admission.
    pub fn forget(&self, tx_hash: &str) {
        self.seen.remove(tx_hash);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Stateless part of admission: checks a single transfer record.
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    denomination: u64,
    max_tx_age: Duration,
    allowed_functions: Vec<String>,
}

impl AdmissionPolicy {
    pub fn from_config(config: &MixerConfig) -> Self {
        Self {
            denomination: config.denomination,
            max_tx_age: config.max_tx_age,
            allowed_functions: config.allowed_functions.clone(),
        }
    }

    /// Checks `record` as of `now`.
    pub fn check(&self, record: &TransferRecord, now: DateTime<Utc>) -> Result<(), AdmissionError> {
        if !record.success {
            return Err(AdmissionError::TransactionFailed(record.tx_hash.clone()));
        }
        if !self.allowed_functions.iter().any(|f| *f == record.function) {
            return Err(AdmissionError::FunctionNotAllowed(record.function.clone()));
        }
        if record.amount != self.denomination {
            return Err(AdmissionError::WrongAmount {
                expected: self.denomination,
                got: record.amount,
            });
        }
        let tx_time = DateTime::<Utc>::from_timestamp_micros(record.timestamp_micros)
            .ok_or(AdmissionError::InvalidTimestamp(record.timestamp_micros))?;
        let age = now - tx_time;
        if age > self.max_tx_age {
            return Err(AdmissionError::TooOld {
                age_secs: age.num_seconds(),
                max_secs: self.max_tx_age.num_seconds(),
            });
        }
        Ok(())
    }

    /// Checks `record` and, if it passes, records its hash in `history`.
    pub fn admit(
        &self,
        record: &TransferRecord,
        history: &DepositHistory,
        now: DateTime<Utc>,
    ) -> Result<(), AdmissionError> {
        if history.contains(&record.tx_hash) {
            return Err(AdmissionError::AlreadyDeposited(record.tx_hash.clone()));
        }
        self.check(record, now)?;
        // a concurrent deposit may have raced us since the first lookup
        if !history.record(&record.tx_hash) {
            return Err(AdmissionError::AlreadyDeposited(record.tx_hash.clone()));
        }
        Ok(())
    }
}
