//! Sparse incremental Merkle trie with succinct inclusion proofs.
//!
//! - [`Trie`]: the trie itself, with insertion, root retrieval and proof generation
//! - [`path`]: derivation of routing bits from a value's leaf hash
//! - [`node`]: leaf and internal nodes and their hash rules
//! - [`proof`]: inclusion proofs, their encodings and stateless verification
//! - [`check`]: trie consistency validation utilities
//!
//! The trie grows lazily: internal nodes exist only where the routing paths of
//! two or more values share a prefix.

pub mod check;
pub mod node;
pub mod path;
pub mod proof;
pub mod trie;

pub use path::{derive_path, RoutingPath};
pub use proof::{verify_proof, verify_proof_with, InclusionProof, ProofStep, Side};
pub use trie::Trie;
