//! Serde adapter that writes a [`Hash32`] as a lowercase hex string.
//!
//! ```
//! use noisetree::utils::{hasher::Hash32, serde_hex};
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Anchor {
//!     #[serde(with = "serde_hex")]
//!     root: Hash32,
//! }
//! ```

use serde::{de::Error, Deserialize, Deserializer, Serializer};

use super::hasher::{hash_from_hex, Hash32};

pub fn serialize<S: Serializer>(hash: &Hash32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(hash))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash32, D::Error> {
    let s = String::deserialize(deserializer)?;
    hash_from_hex(&s).map_err(D::Error::custom)
}
