//! Node model of the trie.
//!
//! Every node is owned by exactly one parent slot (`Option<Box<Node>>`) and the
//! trie owns the root slot, so the structure is a strict tree.
//!
//! Hash rules:
//! - Leaf: `H(value)`, computed once when the leaf is created.
//! - Internal: `H(left || right)`. When only one child exists its hash fills
//!   both slots. This duplication is what lets one-sided branches exist
//!   without precomputed empty-subtree hashes. It also means a missing sibling
//!   cannot be told apart from a sibling equal to its twin.

use super::path::RoutingPath;
use crate::config::NodeEncoding;
use crate::utils::hasher::{self, Hash32, ZERO_HASH32};

#[derive(Debug, Clone)]
pub enum Node {
    Leaf(Leaf),
    Internal(Internal),
}

/// A node holding one committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaf {
    value: Vec<u8>,
    hash: Hash32,
}

/// A node with up to two children and no value of its own.
#[derive(Debug, Clone, Default)]
pub struct Internal {
    children: [Option<Box<Node>>; 2],
    hash: Hash32,
}

impl Leaf {
    pub fn new(value: Vec<u8>) -> Self {
        let hash = hasher::hash(&value);
        Self { value, hash }
    }

    /// Creates a leaf whose hash is already known, e.g. from a derived path.
    pub(crate) fn with_hash(value: Vec<u8>, hash: Hash32) -> Self {
        Self { value, hash }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn hash(&self) -> &Hash32 {
        &self.hash
    }
}

impl Internal {
    pub fn new() -> Self {
        Self {
            children: [None, None],
            hash: ZERO_HASH32,
        }
    }

    pub fn hash(&self) -> &Hash32 {
        &self.hash
    }

    /// Returns the child in direction `bit` (0 = left, 1 = right).
    pub fn child(&self, bit: usize) -> Option<&Node> {
        self.children[bit].as_deref()
    }

    pub(crate) fn child_slot_mut(&mut self, bit: usize) -> &mut Option<Box<Node>> {
        &mut self.children[bit]
    }

    pub(crate) fn set_child(&mut self, bit: usize, node: Node) {
        self.children[bit] = Some(Box::new(node));
    }

    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    /// Hash of the subtree beside direction `bit`, standing in the lone
    /// child's own hash when that sibling slot is empty.
    pub fn sibling_hash(&self, bit: usize) -> Option<Hash32> {
        self.child(bit ^ 1)
            .or_else(|| self.child(bit))
            .map(|node| *node.hash())
    }

    /// Combines the cached child hashes, duplicating a lone child into the
    /// empty slot.
    pub fn combine(&self, encoding: NodeEncoding) -> Hash32 {
        match (self.child(0), self.child(1)) {
            (Some(left), Some(right)) => hasher::hash2(encoding, left.hash(), right.hash()),
            (Some(only), None) | (None, Some(only)) => {
                hasher::hash2(encoding, only.hash(), only.hash())
            }
            // internal nodes are always created with at least one child
            (None, None) => ZERO_HASH32,
        }
    }
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn hash(&self) -> &Hash32 {
        match self {
            Node::Leaf(leaf) => leaf.hash(),
            Node::Internal(internal) => internal.hash(),
        }
    }

    /// The child slot on side `bit`, or `None` for a leaf.
    pub(crate) fn child_slot_mut(&mut self, bit: usize) -> Option<&mut Option<Box<Node>>> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal(internal) => Some(internal.child_slot_mut(bit)),
        }
    }

    /// Refreshes the hashes along `path` starting at this node, which sits at
    /// `level`. Subtrees off the path keep their cached hashes.
    pub(crate) fn rehash_path(
        &mut self,
        path: &RoutingPath,
        level: usize,
        encoding: NodeEncoding,
    ) -> Hash32 {
        match self {
            Node::Leaf(leaf) => leaf.hash,
            Node::Internal(internal) => {
                if level < path.len() {
                    if let Some(child) = internal.children[path.bit(level)].as_mut() {
                        child.rehash_path(path, level + 1, encoding);
                    }
                }
                internal.hash = internal.combine(encoding);
                internal.hash
            }
        }
    }

    /// Recomputes every hash in the subtree, post-order.
    pub(crate) fn rehash_all(&mut self, encoding: NodeEncoding) -> Hash32 {
        match self {
            Node::Leaf(leaf) => {
                leaf.hash = hasher::hash(&leaf.value);
                leaf.hash
            }
            Node::Internal(internal) => {
                for child in internal.children.iter_mut().flatten() {
                    child.rehash_all(encoding);
                }
                internal.hash = internal.combine(encoding);
                internal.hash
            }
        }
    }
}
