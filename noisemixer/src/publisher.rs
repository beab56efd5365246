//! Root publication.
//!
//! After each deposit the new root is handed to a [`RootPublisher`], which
//! anchors it somewhere tamper-evident (an on-chain contract in production).
//! Withdrawals are only checked against roots the publisher has accepted.

use log::debug;
use noisetree::Hash32;
use parking_lot::RwLock;

pub trait RootPublisher: Send + Sync {
    /// Anchors `root`. A failure leaves the root unpublished.
    fn publish(&self, root: &Hash32) -> anyhow::Result<()>;

    /// Whether `root` was accepted by an earlier [`RootPublisher::publish`].
    fn is_published(&self, root: &Hash32) -> bool;
}

/// In-memory publication log, oldest root first.
#[derive(Debug, Default)]
pub struct RootLog {
    roots: RwLock<Vec<Hash32>>,
}

impl RootLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published root. `Mixer` publishes in insertion order,
    /// so this is also the newest trie root.
    pub fn latest(&self) -> Option<Hash32> {
        self.roots.read().last().copied()
    }

    pub fn history(&self) -> Vec<Hash32> {
        self.roots.read().clone()
    }

    pub fn len(&self) -> usize {
        self.roots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.read().is_empty()
    }
}

impl RootPublisher for RootLog {
    fn publish(&self, root: &Hash32) -> anyhow::Result<()> {
        let mut roots = self.roots.write();
        if roots.last() != Some(root) {
            debug!("root log: appending {}", hex::encode(root));
            roots.push(*root);
        }
        Ok(())
    }

    fn is_published(&self, root: &Hash32) -> bool {
        self.roots.read().contains(root)
    }
}
