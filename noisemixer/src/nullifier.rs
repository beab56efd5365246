//! Single-use tracking of withdrawn secrets.
//!
//! The nullifier of a secret is `SHA-256(secret)`. It is the same digest as the
//! secret's leaf hash, so a spent nullifier marks exactly one trie leaf as used
//! without revealing the secret.

use dashmap::DashSet;
use noisetree::{utils::hasher, Hash32};

pub fn nullifier<T: AsRef<[u8]>>(secret: T) -> Hash32 {
    hasher::hash(secret)
}

#[derive(Debug, Default)]
pub struct NullifierSet {
    spent: DashSet<Hash32>,
}

impl NullifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_spent(&self, nullifier: &Hash32) -> bool {
        self.spent.contains(nullifier)
    }

    /// Marks `nullifier` spent, returning false if it already was.
    pub fn spend(&self, nullifier: Hash32) -> bool {
        self.spent.insert(nullifier)
    }

    pub fn len(&self) -> usize {
        self.spent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spent.is_empty()
    }
}
