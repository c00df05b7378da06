use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hash::hash_block;
use crate::transaction::Transaction;

/// `previous_hash` of the genesis block; it has no predecessor to hash.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Proof of the genesis block, accepted without a puzzle check.
pub const GENESIS_PROOF: u64 = 100;

/// A single block in the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    /// Proof-of-Work answer relative to the previous block's proof.
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(
            1,
            Vec::new(),
            GENESIS_PROOF,
            GENESIS_PREVIOUS_HASH.to_string(),
        )
    }

    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Digest over the canonical serialization, used by the next block's
    /// `previous_hash`.
    pub fn hash(&self) -> String {
        hash_block(self)
    }
}

/// Current UTC time in fractional seconds.
fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
