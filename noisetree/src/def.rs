//! Core definitions and constants for the trie.
//!
//! This module contains the fixed parameters shared by the trie, the proof
//! codec and the configuration layer:
//! - Hash and routing path dimensions
//! - Binary proof layout
//! - Side tags used on the wire

/// Length in bytes of every hash in the trie (SHA-256 output).
pub const HASH_LEN: usize = 32;

/// Maximum routing path length. One bit of the 256-bit leaf hash per level.
pub const MAX_DEPTH: usize = HASH_LEN * 8;

/// Routing path length used when no depth is configured.
pub const DEFAULT_DEPTH: usize = MAX_DEPTH;

/// Size of the step-count header in the binary proof encoding.
pub const PROOF_HEADER_LEN: usize = 4;

/// Size of one step in the binary proof encoding: a side byte and a sibling hash.
pub const PROOF_STEP_LEN: usize = 1 + HASH_LEN;

/// Side byte for a sibling that sits to the left of the running hash.
pub const SIDE_LEFT: u8 = 0;

/// Side byte for a sibling that sits to the right of the running hash.
pub const SIDE_RIGHT: u8 = 1;
