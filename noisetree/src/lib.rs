//! noisetree is an authenticated set-membership structure: a sparse, incrementally
//! built binary hash trie that commits to a growing set of secret values and
//! proves that a value belongs to the set as of a published root hash.
//!
//! # Overview
//! noisetree provides:
//! - Deterministic routing of values by the bits of their SHA-256 leaf hash
//! - Lazy growth: internal nodes only where two values' paths share a prefix
//! - Collision push-down when a new value lands on an occupied leaf
//! - Eager hash refresh after every insertion, so the root is always current
//! - Inclusion proofs as standalone values, verifiable without the trie
//!
//! # Architecture
//!
//! ## Core Components
//! - [`Trie`]: owns the nodes and exposes `insert`, `root` and `get_proof`
//! - [`InclusionProof`]: ordered `(sibling_hash, side)` pairs, leaf to root
//! - [`verify_proof`]: recomputes a root from `(value, proof)` and compares it
//!   with a trusted root
//!
//! ## Supporting Components
//! - [`config`]: depth and node encoding
//! - [`merkletree::check`]: consistency checks for tests and debugging
//! - [`utils::hasher`]: SHA-256 helpers
//!
//! # Hash Rules
//! - Leaf: `H(value)`
//! - Internal: `H(left || right)`, where a missing child is replaced by its
//!   sibling's hash. A trie holding a single value has that value's leaf hash
//!   as its root.
//!
//! # Example Usage
//! ```
//! use noisetree::{verify_proof, Trie};
//!
//! let mut trie = Trie::new();
//! trie.insert("leaf1").unwrap();
//! trie.insert("leaf2").unwrap();
//!
//! let root = trie.root().unwrap();
//! let proof = trie.get_proof("leaf1").unwrap();
//! assert!(verify_proof("leaf1", &proof, &root));
//! ```
//!
//! # Note on Thread Safety
//! The trie has no internal synchronization. Mutation takes `&mut self`;
//! callers sharing a trie must hold one lock over an insertion and the root
//! or proof reads that depend on it. Verification is a pure function and can
//! run concurrently anywhere.

pub mod config;
pub mod def;
pub mod error;
pub mod merkletree;
pub mod utils;

pub use config::{Config, NodeEncoding};
pub use error::TrieError;
pub use merkletree::{verify_proof, verify_proof_with, InclusionProof, ProofStep, Side, Trie};
pub use utils::hasher::Hash32;
