//! Deposit and withdrawal flows around the trie.
//!
//! A deposit admits the paying transfer, inserts the secret, reads the new
//! root and the secret's proof under one lock, then publishes the root.
//! A withdrawal checks the proof against a published root and spends the
//! secret's nullifier. Verification does not touch the live trie.

use chrono::{DateTime, Utc};
use log::{info, warn};
use noisetree::{
    utils::serde_hex, verify_proof_with, Hash32, InclusionProof, Trie, TrieError,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::admission::{AdmissionError, AdmissionPolicy, DepositHistory, TransferRecord};
use crate::config::MixerConfig;
use crate::nullifier::{nullifier, NullifierSet};
use crate::publisher::{RootLog, RootPublisher};

#[derive(Error, Debug)]
pub enum MixerError {
    #[error("Trie error: {0}")]
    Trie(#[from] TrieError),

    #[error("Admission error: {0}")]
    Admission(#[from] AdmissionError),

    #[error("Secret already committed")]
    DuplicateCommitment,

    #[error("Root {0} was never published")]
    UnknownRoot(String),

    #[error("Proof does not verify against root {0}")]
    InvalidProof(String),

    #[error("Nullifier {0} already spent")]
    NullifierSpent(String),

    #[error("Missing withdrawal recipient")]
    MissingRecipient,
}

/// What a depositor needs to withdraw later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    #[serde(with = "serde_hex")]
    pub root: Hash32,
    pub proof: InclusionProof,
    /// Whether the root publisher accepted `root`
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub secret: String,
    pub proof: InclusionProof,
    #[serde(with = "serde_hex")]
    pub root: Hash32,
    pub recipient: String,
}

/// An authorized withdrawal, to be paid out by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalTicket {
    pub recipient: String,
    #[serde(with = "serde_hex")]
    pub nullifier: Hash32,
}

pub struct Mixer<P: RootPublisher = RootLog> {
    config: MixerConfig,
    trie: Mutex<Trie>,
    policy: AdmissionPolicy,
    history: DepositHistory,
    nullifiers: NullifierSet,
    publisher: P,
}

impl Mixer<RootLog> {
    /// Creates a mixer that publishes roots to an in-memory [`RootLog`].
    pub fn with_root_log(config: MixerConfig) -> Result<Self, MixerError> {
        Self::new(config, RootLog::new())
    }
}

impl<P: RootPublisher> Mixer<P> {
    pub fn new(config: MixerConfig, publisher: P) -> Result<Self, MixerError> {
        let trie = Trie::with_config(config.trie)?;
        Ok(Self {
            policy: AdmissionPolicy::from_config(&config),
            config,
            trie: Mutex::new(trie),
            history: DepositHistory::new(),
            nullifiers: NullifierSet::new(),
            publisher,
        })
    }

    pub fn config(&self) -> &MixerConfig {
        &self.config
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn history(&self) -> &DepositHistory {
        &self.history
    }

    pub fn nullifiers(&self) -> &NullifierSet {
        &self.nullifiers
    }

    pub fn root(&self) -> Option<Hash32> {
        self.trie.lock().root()
    }

    pub fn deposit_count(&self) -> usize {
        self.trie.lock().len()
    }

    pub fn proof(&self, secret: &str) -> Result<InclusionProof, MixerError> {
        Ok(self.trie.lock().get_proof(secret)?)
    }

    pub fn deposit(
        &self,
        secret: &str,
        transfer: &TransferRecord,
    ) -> Result<DepositReceipt, MixerError> {
        self.deposit_at(secret, transfer, Utc::now())
    }

    /// Deposits `secret`, paid for by `transfer`, with admission judged as of `now`.
    pub fn deposit_at(
        &self,
        secret: &str,
        transfer: &TransferRecord,
        now: DateTime<Utc>,
    ) -> Result<DepositReceipt, MixerError> {
        if secret.is_empty() {
            return Err(AdmissionError::EmptySecret.into());
        }
        if let Err(e) = self.policy.admit(transfer, &self.history, now) {
            warn!("deposit rejected: {}", e);
            return Err(e.into());
        }

        // publish before releasing the trie so roots reach the publisher in
        // insertion order
        let (root, proof, published) = {
            let mut trie = self.trie.lock();
            let inserted = match trie.insert(secret) {
                Ok(inserted) => inserted,
                Err(e) => {
                    self.history.forget(&transfer.tx_hash);
                    return Err(e.into());
                }
            };
            if !inserted {
                self.history.forget(&transfer.tx_hash);
                return Err(MixerError::DuplicateCommitment);
            }
            // both exist: the trie just received `secret`
            let root = trie.root().ok_or(TrieError::EmptyTree)?;
            let proof = trie.get_proof(secret)?;
            let published = match self.publisher.publish(&root) {
                Ok(()) => true,
                Err(e) => {
                    warn!("failed to publish root {}: {}", hex::encode(root), e);
                    false
                }
            };
            (root, proof, published)
        };

        info!(
            "deposit tx {} committed, root {}, proof length {}",
            transfer.tx_hash,
            hex::encode(root),
            proof.len()
        );
        Ok(DepositReceipt {
            root,
            proof,
            published,
        })
    }

    /// Authorizes a withdrawal. The proof is checked against the request's
    /// root, which must have been published; the secret's nullifier is spent
    /// only if everything else passes.
    pub fn withdraw(&self, request: &WithdrawRequest) -> Result<WithdrawalTicket, MixerError> {
        if request.recipient.is_empty() {
            return Err(MixerError::MissingRecipient);
        }
        if !self.publisher.is_published(&request.root) {
            return Err(MixerError::UnknownRoot(hex::encode(request.root)));
        }
        if !verify_proof_with(
            self.config.trie.encoding,
            &request.secret,
            &request.proof,
            &request.root,
        ) {
            return Err(MixerError::InvalidProof(hex::encode(request.root)));
        }
        let nullifier = nullifier(&request.secret);
        if !self.nullifiers.spend(nullifier) {
            return Err(MixerError::NullifierSpent(hex::encode(nullifier)));
        }
        info!(
            "withdrawal to {} authorized, nullifier {}",
            request.recipient,
            hex::encode(nullifier)
        );
        Ok(WithdrawalTicket {
            recipient: request.recipient.clone(),
            nullifier,
        })
    }
}
