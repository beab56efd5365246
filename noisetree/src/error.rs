use crate::def::MAX_DEPTH;
use thiserror::Error;

/// Errors reported by trie operations and proof decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("Tree is empty")]
    EmptyTree,

    #[error("Value not found in tree")]
    ValueNotFound,

    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// Two distinct values share all routing bits, so no level is left to split them.
    #[error("Routing paths collide over all {depth} levels")]
    PathExhausted { depth: usize },

    #[error("Invalid depth {0}. Depth must be between 1 and {max}", max = MAX_DEPTH)]
    InvalidDepth(usize),
}
