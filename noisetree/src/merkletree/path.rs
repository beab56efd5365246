//! Routing path derivation.
//!
//! A value's routing path is read from its leaf hash `SHA-256(value)`. The
//! digest is interpreted as a big-endian 256-bit integer `n`, and the bit used
//! at level `i` (counted from the root) is `(n >> i) & 1`: least significant
//! bit first. In byte terms that is bit `i % 8` of `digest[31 - i / 8]`.
//!
//! Insertion, proof generation and the consistency checker all derive paths
//! through this module, so the order never differs between them.

use crate::config::Config;
use crate::def::HASH_LEN;
use crate::error::TrieError;
use crate::utils::hasher::{self, Hash32};

/// The first `depth` routing bits of a value, backed by its leaf hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingPath {
    leaf_hash: Hash32,
    depth: usize,
}

impl RoutingPath {
    /// Derives the routing path of `value`.
    pub fn derive<T: AsRef<[u8]>>(value: T, depth: usize) -> Result<Self, TrieError> {
        Self::from_leaf_hash(hasher::hash(value), depth)
    }

    /// Builds a routing path from an already computed leaf hash.
    pub fn from_leaf_hash(leaf_hash: Hash32, depth: usize) -> Result<Self, TrieError> {
        Config::from_depth(depth).validate()?;
        Ok(Self { leaf_hash, depth })
    }

    pub fn leaf_hash(&self) -> &Hash32 {
        &self.leaf_hash
    }

    pub fn len(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Returns the routing bit (0 = left, 1 = right) at `level`.
    ///
    /// # Panics
    /// Panics if `level` is not below the path length
    pub fn bit(&self, level: usize) -> usize {
        assert!(level < self.depth, "level {} out of path of {}", level, self.depth);
        ((self.leaf_hash[HASH_LEN - 1 - level / 8] >> (level % 8)) & 1) as usize
    }

    pub fn bits(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.depth).map(move |level| self.bit(level))
    }

    /// Returns the first level at or below `from` where the two paths take
    /// different directions, or `None` if they agree down to the last level.
    pub fn divergence(&self, other: &RoutingPath, from: usize) -> Option<usize> {
        let depth = self.depth.min(other.depth);
        (from..depth).find(|&level| self.bit(level) != other.bit(level))
    }
}

/// Maps a value to its routing bits, one per trie level.
pub fn derive_path<T: AsRef<[u8]>>(value: T, depth: usize) -> Result<RoutingPath, TrieError> {
    RoutingPath::derive(value, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::MAX_DEPTH;

    fn bit_by_shift(digest: &Hash32, level: usize) -> usize {
        // reference: shift the big-endian integer right by `level`
        let mut n = *digest;
        for _ in 0..level {
            let mut carry = 0u8;
            for byte in n.iter_mut() {
                let next_carry = *byte & 1;
                *byte = (*byte >> 1) | (carry << 7);
                carry = next_carry;
            }
        }
        (n[HASH_LEN - 1] & 1) as usize
    }

    #[test]
    fn test_bit_order() {
        let path = derive_path(b"leaf1", MAX_DEPTH).unwrap();
        let digest = hasher::hash(b"leaf1");
        for level in 0..MAX_DEPTH {
            assert_eq!(path.bit(level), bit_by_shift(&digest, level), "level {}", level);
        }
    }

    #[test]
    fn test_known_bits() {
        let mut digest = [0u8; HASH_LEN];
        digest[31] = 0b0000_0101;
        digest[0] = 0b1000_0000;
        let path = RoutingPath::from_leaf_hash(digest, MAX_DEPTH).unwrap();
        assert_eq!(path.bit(0), 1);
        assert_eq!(path.bit(1), 0);
        assert_eq!(path.bit(2), 1);
        assert_eq!(path.bit(3), 0);
        assert_eq!(path.bit(255), 1);
        assert_eq!(path.bits().filter(|&b| b == 1).count(), 3);
    }

    #[test]
    fn test_deterministic() {
        let a = derive_path("stress_7", 64).unwrap();
        let b = derive_path("stress_7", 64).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bits().collect::<Vec<_>>(), b.bits().collect::<Vec<_>>());
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_invalid_depth() {
        assert_eq!(derive_path(b"x", 0), Err(TrieError::InvalidDepth(0)));
        assert_eq!(derive_path(b"x", 300), Err(TrieError::InvalidDepth(300)));
    }

    #[test]
    fn test_divergence() {
        let mut a = [0u8; HASH_LEN];
        let mut b = [0u8; HASH_LEN];
        a[31] = 0b0001_0110;
        b[31] = 0b0000_0110;
        let pa = RoutingPath::from_leaf_hash(a, 8).unwrap();
        let pb = RoutingPath::from_leaf_hash(b, 8).unwrap();
        assert_eq!(pa.divergence(&pb, 0), Some(4));
        assert_eq!(pa.divergence(&pb, 4), Some(4));
        assert_eq!(pa.divergence(&pb, 5), None);
        assert_eq!(pa.divergence(&pa, 0), None);
    }
}
