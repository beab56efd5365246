//! Inclusion proofs and their stateless verification.
//!
//! A proof is the list of sibling hashes met on the way from a leaf up to the
//! root, each tagged with the side the sibling sits on. Verification folds the
//! list over `H(value)` and compares the result with a trusted root; it needs
//! nothing from the trie that produced the proof.
//!
//! Two encodings are supported:
//! - JSON: an array of `[sibling_hex, "left" | "right"]` pairs.
//! - Binary: a 4-byte little-endian step count followed by 33-byte steps
//!   (side byte, then the 32-byte sibling hash).

use std::fmt;
use std::str::FromStr;

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::config::NodeEncoding;
use crate::def::{HASH_LEN, PROOF_HEADER_LEN, PROOF_STEP_LEN, SIDE_LEFT, SIDE_RIGHT};
use crate::error::TrieError;
use crate::utils::hasher::{self, Hash32};

/// Which side of the running hash a sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side of the sibling when the path descends in direction `bit`.
    pub fn of_sibling(bit: usize) -> Self {
        if bit == 0 {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Side::Left => SIDE_LEFT,
            Side::Right => SIDE_RIGHT,
        }
    }

    pub fn from_byte(b: u8) -> Result<Self, TrieError> {
        match b {
            SIDE_LEFT => Ok(Side::Left),
            SIDE_RIGHT => Ok(Side::Right),
            other => Err(TrieError::MalformedProof(format!(
                "invalid side byte {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(TrieError::MalformedProof(format!(
                "invalid side tag '{}'",
                other
            ))),
        }
    }
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(String, String)", into = "(String, String)")]
pub struct ProofStep {
    pub sibling: Hash32,
    pub side: Side,
}

impl ProofStep {
    pub fn new(sibling: Hash32, side: Side) -> Self {
        Self { sibling, side }
    }

    /// Hashes `current` together with this step's sibling.
    pub fn apply(&self, encoding: NodeEncoding, current: &Hash32) -> Hash32 {
        hasher::hash2x(encoding, current, &self.sibling, self.side == Side::Left)
    }
}

impl TryFrom<(String, String)> for ProofStep {
    type Error = TrieError;

    fn try_from((sibling, side): (String, String)) -> Result<Self, Self::Error> {
        let sibling = hasher::hash_from_hex(&sibling).map_err(|e| {
            TrieError::MalformedProof(format!("invalid sibling hash '{}': {}", sibling, e))
        })?;
        Ok(Self::new(sibling, side.parse()?))
    }
}

impl From<ProofStep> for (String, String) {
    fn from(step: ProofStep) -> Self {
        (hex::encode(step.sibling), step.side.as_str().to_owned())
    }
}

/// Ordered sibling hashes from a leaf's nearest sibling up to the root's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InclusionProof {
    steps: Vec<ProofStep>,
}

impl InclusionProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [ProofStep] {
        &mut self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProofStep> {
        self.steps.iter()
    }

    /// Folds the proof over `H(value)` and returns the implied root.
    pub fn compute_root<T: AsRef<[u8]>>(&self, encoding: NodeEncoding, value: T) -> Hash32 {
        self.steps
            .iter()
            .fold(hasher::hash(value), |h, step| step.apply(encoding, &h))
    }

    pub fn to_json(&self) -> String {
        // a Vec of string pairs always serializes
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(s: &str) -> Result<Self, TrieError> {
        serde_json::from_str(s).map_err(|e| TrieError::MalformedProof(e.to_string()))
    }

    /// Serializes the proof into its binary form.
    ///
    /// The format is:
    /// - 4 bytes: step count (little-endian)
    /// - per step, 1 byte side tag and 32 bytes sibling hash
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut res = vec![0u8; PROOF_HEADER_LEN + self.steps.len() * PROOF_STEP_LEN];
        LittleEndian::write_u32(&mut res[..PROOF_HEADER_LEN], self.steps.len() as u32);
        for (i, step) in self.steps.iter().enumerate() {
            let start = PROOF_HEADER_LEN + i * PROOF_STEP_LEN;
            res[start] = step.side.to_byte();
            res[start + 1..start + PROOF_STEP_LEN].copy_from_slice(&step.sibling);
        }
        res
    }

    /// Deserializes a proof produced by [`InclusionProof::to_bytes`].
    pub fn from_bytes(bz: &[u8]) -> Result<Self, TrieError> {
        if bz.len() < PROOF_HEADER_LEN {
            return Err(TrieError::MalformedProof(format!(
                "proof of {} bytes is shorter than its header",
                bz.len()
            )));
        }
        let count = LittleEndian::read_u32(&bz[..PROOF_HEADER_LEN]) as usize;
        let body = &bz[PROOF_HEADER_LEN..];
        if body.len() != count * PROOF_STEP_LEN {
            return Err(TrieError::MalformedProof(format!(
                "expected {} steps of {} bytes, got {} bytes",
                count,
                PROOF_STEP_LEN,
                body.len()
            )));
        }
        let mut steps = Vec::with_capacity(count);
        for chunk in body.chunks_exact(PROOF_STEP_LEN) {
            let side = Side::from_byte(chunk[0])?;
            let mut sibling = [0u8; HASH_LEN];
            sibling.copy_from_slice(&chunk[1..]);
            steps.push(ProofStep::new(sibling, side));
        }
        Ok(Self { steps })
    }
}

impl<'a> IntoIterator for &'a InclusionProof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Checks `proof` for `value` against a trusted `root`, using the default
/// node encoding.
pub fn verify_proof<T: AsRef<[u8]>>(value: T, proof: &InclusionProof, root: &Hash32) -> bool {
    verify_proof_with(NodeEncoding::default(), value, proof, root)
}

/// Checks `proof` for `value` against a trusted `root` under `encoding`.
pub fn verify_proof_with<T: AsRef<[u8]>>(
    encoding: NodeEncoding,
    value: T,
    proof: &InclusionProof,
    root: &Hash32,
) -> bool {
    proof.compute_root(encoding, value) == *root
}
