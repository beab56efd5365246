//! Utility functions for the trie.
//!
//! - Hashing functions
//! - Hex (de)serialization of digests

pub mod hasher;
pub mod serde_hex;
