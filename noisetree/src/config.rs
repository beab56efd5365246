//! Configuration for the trie.
//!
//! Two parameters control the shape and the hashes of a trie:
//! - `depth`: the number of routing bits derived from each value (default: 256).
//!   A smaller depth bounds the height of the trie but makes it possible for two
//!   distinct values to share a whole routing path, which insertion reports as
//!   [`TrieError::PathExhausted`].
//! - `encoding`: how two child hashes are joined before hashing an internal node.
//!   The prover and every verifier must agree on it.
//!
//! # Usage Examples
//! ```
//! use noisetree::config::{Config, NodeEncoding};
//!
//! // Default configuration: 256 levels, hex-joined child hashes
//! let config = Config::default();
//!
//! // A shallow trie with raw byte concatenation
//! let mut config = Config::from_depth(16);
//! config.set_encoding(NodeEncoding::Raw);
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::def::{DEFAULT_DEPTH, MAX_DEPTH};
use crate::error::TrieError;

/// How the two child hashes of an internal node are joined before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeEncoding {
    /// Concatenate the lowercase hex strings of both children (128 ASCII bytes).
    /// Roots already anchored on chain were produced with this encoding.
    #[default]
    Hex,
    /// Concatenate the two raw 32-byte digests.
    Raw,
}

impl NodeEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeEncoding::Hex => "hex",
            NodeEncoding::Raw => "raw",
        }
    }
}

impl fmt::Display for NodeEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(NodeEncoding::Hex),
            "raw" => Ok(NodeEncoding::Raw),
            other => Err(format!("unknown node encoding '{}', expected hex or raw", other)),
        }
    }
}

/// Configuration for a [`Trie`](crate::merkletree::Trie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of routing bits per value, between 1 and 256
    pub depth: usize,
    /// Join rule for internal node hashes
    pub encoding: NodeEncoding,
}

impl Default for Config {
    /// Creates a new Config instance with default values.
    ///
    /// # Default Values
    /// - `depth`: 256
    /// - `encoding`: `NodeEncoding::Hex`
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            encoding: NodeEncoding::default(),
        }
    }
}

impl Config {
    pub fn new(depth: usize, encoding: NodeEncoding) -> Self {
        Self { depth, encoding }
    }

    /// Creates a new Config instance with default values except for the depth.
    pub fn from_depth(depth: usize) -> Self {
        Config {
            depth,
            ..Config::default()
        }
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn set_encoding(&mut self, encoding: NodeEncoding) {
        self.encoding = encoding;
    }

    /// Checks that the depth fits in the 256-bit leaf hash.
    pub fn validate(&self) -> Result<(), TrieError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(TrieError::InvalidDepth(self.depth));
        }
        Ok(())
    }
}
