//! Verification utilities for trie consistency checking.
//!
//! The checks ensure that:
//! 1. Every leaf caches `H(value)`
//! 2. Every internal node caches the hash of its children, with a lone child
//!    duplicated into the empty slot
//! 3. No internal node is childless
//! 4. Every leaf sits on its own routing path, above the configured depth
//! 5. The number of leaves matches the trie's length

use super::node::Node;
use super::path::RoutingPath;
use super::trie::Trie;
use crate::utils::hasher;

/// Verifies that two byte slices contain the same hash value
///
/// # Panics
/// Panics if the hash values don't match
pub fn hash_equal(tag: &str, a: &[u8], b: &[u8]) {
    if !a.eq(b) {
        panic!(
            "{} not equal: {} vs {}",
            tag,
            hex::encode(a),
            hex::encode(b)
        );
    }
}

/// Verifies the hashes and the shape of the whole trie
///
/// # Panics
/// Panics if any cached hash is stale or any node is misplaced
pub fn check_hash_consistency(trie: &Trie) {
    let Some(root) = trie.root_node() else {
        assert_eq!(trie.len(), 0, "empty trie with non-zero length");
        return;
    };
    let mut route = Vec::with_capacity(trie.config().depth);
    let leaves = check_node(trie, root, &mut route);
    assert_eq!(leaves, trie.len(), "leaf count does not match trie length");
}

/// Checks the subtree at `node`, reached through the directions in `route`.
/// Returns the number of leaves below it.
fn check_node(trie: &Trie, node: &Node, route: &mut Vec<usize>) -> usize {
    let config = trie.config();
    match node {
        Node::Leaf(leaf) => {
            hash_equal("Leaf", leaf.hash(), &hasher::hash(leaf.value()));
            assert!(
                route.len() <= config.depth,
                "leaf below depth {}",
                config.depth
            );
            let path = match RoutingPath::derive(leaf.value(), config.depth) {
                Ok(path) => path,
                Err(e) => panic!("cannot derive path: {}", e),
            };
            for (level, &bit) in route.iter().enumerate() {
                if path.bit(level) != bit {
                    panic!(
                        "leaf {} misplaced at level {}",
                        hex::encode(leaf.hash()),
                        level
                    );
                }
            }
            1
        }
        Node::Internal(internal) => {
            assert!(internal.child_count() > 0, "childless internal node");
            assert!(
                route.len() < config.depth,
                "internal node at depth {}",
                route.len()
            );
            hash_equal(
                "Internal",
                internal.hash(),
                &internal.combine(config.encoding),
            );
            let mut leaves = 0;
            for bit in 0..2 {
                if let Some(child) = internal.child(bit) {
                    route.push(bit);
                    leaves += check_node(trie, child, route);
                    route.pop();
                }
            }
            leaves
        }
    }
}

