//! noisemixer wires the noisetree trie into a commitment-based mixer.
//!
//! - [`admission`]: deposit transfer checks and the deposit history
//! - [`publisher`]: root publication, with an in-memory [`RootLog`](publisher::RootLog)
//! - [`nullifier`]: single-use tracking of withdrawn secrets
//! - [`mixer`]: the deposit and withdrawal flows
//! - [`cli`]: the `noisemixer` command line
//!
//! Chain access (reading transfers, anchoring roots, paying out) stays with
//! the caller; this crate only needs the records and traits defined here.

pub mod admission;
pub mod cli;
pub mod config;
pub mod mixer;
pub mod nullifier;
pub mod publisher;

pub use admission::{AdmissionError, TransferRecord};
pub use config::MixerConfig;
pub use mixer::{DepositReceipt, Mixer, MixerError, WithdrawRequest, WithdrawalTicket};
pub use publisher::{RootLog, RootPublisher};
