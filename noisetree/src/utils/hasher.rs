//! Hashing utilities for the trie.
//!
//! This module provides SHA-256 based hashing functions for:
//! - Leaf values
//! - Pairs of child hashes (for internal nodes and proof folding)
//! - Hex parsing of digests

use sha2::{Digest, Sha256};

use crate::config::NodeEncoding;
use crate::def::HASH_LEN;

/// Type alias for a 32-byte hash value.
pub type Hash32 = [u8; HASH_LEN];

/// A constant representing a hash of all zeros.
/// Placeholder for internal nodes whose hash has not been computed yet.
pub const ZERO_HASH32: Hash32 = [0u8; HASH_LEN];

/// Computes the SHA-256 hash of a single value.
///
/// # Arguments
/// * `a` - Value to hash
///
/// # Returns
/// The 32-byte hash of the input
pub fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.finalize().into()
}

/// Computes the hash of an internal node from its two child hashes.
///
/// With [`NodeEncoding::Hex`] the children are joined as lowercase hex text,
/// with [`NodeEncoding::Raw`] as raw bytes.
///
/// # Arguments
/// * `encoding` - Join rule for the two children
/// * `a` - Left child hash
/// * `b` - Right child hash
///
/// # Returns
/// The 32-byte hash of both children
pub fn hash2(encoding: NodeEncoding, a: &Hash32, b: &Hash32) -> Hash32 {
    let mut hasher = Sha256::new();
    match encoding {
        NodeEncoding::Hex => {
            hasher.update(hex::encode(a));
            hasher.update(hex::encode(b));
        }
        NodeEncoding::Raw => {
            hasher.update(a);
            hasher.update(b);
        }
    }
    hasher.finalize().into()
}

/// Computes the hash of two values with optional order swapping.
///
/// Similar to hash2, but swaps `a` and `b` when `exchange_ab` is set.
pub fn hash2x(encoding: NodeEncoding, a: &Hash32, b: &Hash32, exchange_ab: bool) -> Hash32 {
    if exchange_ab {
        hash2(encoding, b, a)
    } else {
        hash2(encoding, a, b)
    }
}

/// Parses a 64-character hex string into a hash.
pub fn hash_from_hex<T: AsRef<[u8]>>(s: T) -> Result<Hash32, hex::FromHexError> {
    let mut out = [0u8; HASH_LEN];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out)
}
