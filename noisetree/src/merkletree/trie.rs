//! The sparse incremental Merkle trie.
//!
//! Values are routed by the bits of their leaf hash (see [`super::path`]).
//! Internal nodes are only created where two resident values' paths share a
//! prefix, so a trie holding `n` values has `n` leaves and at most a few
//! internal nodes per collision.
//!
//! Insertion of a value whose leaf slot is already taken by a different value
//! pushes the resident leaf down: the slot becomes an internal node and a
//! chain of single-child internal nodes is built down to the first level where
//! the two paths diverge. Both leaves end up as children of the node at that
//! level.
//!
//! After every insertion the hashes on the inserted value's path are
//! refreshed, which is the only part of the trie an insertion can change.
//!
//! The trie has no internal locking. `insert` takes `&mut self`, so callers
//! sharing a trie across threads must wrap it in a lock that also covers the
//! root and proof reads that follow an insertion.

use log::debug;

use super::node::{Internal, Leaf, Node};
use super::path::RoutingPath;
use super::proof::{InclusionProof, ProofStep, Side};
use crate::config::Config;
use crate::error::TrieError;
use crate::utils::hasher::Hash32;

#[derive(Debug, Clone, Default)]
pub struct Trie {
    root: Option<Box<Node>>,
    config: Config,
    len: usize,
}

impl Trie {
    /// Creates an empty trie with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trie, rejecting a depth outside `1..=256`.
    pub fn with_config(config: Config) -> Result<Self, TrieError> {
        config.validate()?;
        Ok(Self {
            root: None,
            config,
            len: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of distinct values in the trie.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root hash, or `None` for an empty trie.
    pub fn root(&self) -> Option<Hash32> {
        self.root.as_ref().map(|node| *node.hash())
    }

    pub fn root_hex(&self) -> Option<String> {
        self.root().map(hex::encode)
    }

    pub(crate) fn root_node(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Inserts `value` and refreshes the hashes on its path.
    ///
    /// Returns `Ok(false)` if the value was already present, in which case
    /// nothing changes. Fails with [`TrieError::PathExhausted`] if a resident
    /// value shares every routing bit with `value`; the trie is left untouched
    /// in that case.
    pub fn insert<T: AsRef<[u8]>>(&mut self, value: T) -> Result<bool, TrieError> {
        let value = value.as_ref();
        let depth = self.config.depth;
        let path = RoutingPath::derive(value, depth)?;

        let mut slot = &mut self.root;
        let mut level = 0;
        loop {
            match slot.as_deref() {
                None => {
                    *slot = Some(Box::new(Node::Leaf(Leaf::with_hash(
                        value.to_vec(),
                        *path.leaf_hash(),
                    ))));
                    break;
                }
                Some(Node::Internal(_)) => {
                    if level >= depth {
                        return Err(TrieError::PathExhausted { depth });
                    }
                    let bit = path.bit(level);
                    slot = match slot.as_deref_mut().and_then(|node| node.child_slot_mut(bit)) {
                        Some(child) => child,
                        None => return Err(TrieError::PathExhausted { depth }),
                    };
                    level += 1;
                }
                Some(Node::Leaf(leaf)) => {
                    if leaf.value() == value {
                        return Ok(false);
                    }
                    let resident_path = RoutingPath::from_leaf_hash(*leaf.hash(), depth)?;
                    let split = resident_path
                        .divergence(&path, level)
                        .ok_or(TrieError::PathExhausted { depth })?;
                    debug!(
                        "collision at level {}, pushing resident leaf down to level {}",
                        level,
                        split + 1
                    );
                    if let Some(node) = slot.as_deref_mut() {
                        if let Node::Leaf(leaf) = node {
                            let resident = std::mem::take(leaf);
                            let newcomer = Leaf::with_hash(value.to_vec(), *path.leaf_hash());
                            *node =
                                Self::fork(level, split, resident, &resident_path, newcomer, &path);
                        }
                    }
                    break;
                }
            }
        }

        self.len += 1;
        if let Some(root) = self.root.as_mut() {
            root.rehash_path(&path, 0, self.config.encoding);
        }
        Ok(true)
    }

    /// Builds the subtree that replaces a resident leaf at `level`: single-child
    /// internal nodes for the shared levels `level..split`, and at `split` an
    /// internal node holding both leaves.
    fn fork(
        level: usize,
        split: usize,
        resident: Leaf,
        resident_path: &RoutingPath,
        newcomer: Leaf,
        path: &RoutingPath,
    ) -> Node {
        let mut fork = Internal::new();
        fork.set_child(resident_path.bit(split), Node::Leaf(resident));
        fork.set_child(path.bit(split), Node::Leaf(newcomer));

        let mut node = Node::Internal(fork);
        for shared in (level..split).rev() {
            let mut parent = Internal::new();
            parent.set_child(path.bit(shared), node);
            node = Node::Internal(parent);
        }
        node
    }

    /// Recomputes every hash in the trie and returns the new root.
    ///
    /// Insertion already keeps hashes current; this is the full post-order
    /// pass that path-only refreshing must agree with.
    pub fn recompute_all(&mut self) -> Option<Hash32> {
        let encoding = self.config.encoding;
        self.root.as_mut().map(|root| root.rehash_all(encoding))
    }

    /// Generates an inclusion proof for `value`, nearest sibling first.
    pub fn get_proof<T: AsRef<[u8]>>(&self, value: T) -> Result<InclusionProof, TrieError> {
        let value = value.as_ref();
        let mut node = self.root.as_deref().ok_or(TrieError::EmptyTree)?;
        let path = RoutingPath::derive(value, self.config.depth)?;

        let mut steps = Vec::new();
        let mut level = 0;
        loop {
            match node {
                Node::Leaf(leaf) => {
                    if leaf.value() != value {
                        return Err(TrieError::ValueNotFound);
                    }
                    break;
                }
                Node::Internal(internal) => {
                    if level >= path.len() {
                        return Err(TrieError::ValueNotFound);
                    }
                    let bit = path.bit(level);
                    let child = internal.child(bit).ok_or(TrieError::ValueNotFound)?;
                    let sibling = internal
                        .sibling_hash(bit)
                        .ok_or(TrieError::ValueNotFound)?;
                    steps.push(ProofStep::new(sibling, Side::of_sibling(bit)));
                    node = child;
                    level += 1;
                }
            }
        }

        steps.reverse();
        Ok(InclusionProof::new(steps))
    }

    pub fn contains<T: AsRef<[u8]>>(&self, value: T) -> bool {
        self.get_proof(value).is_ok()
    }
}
