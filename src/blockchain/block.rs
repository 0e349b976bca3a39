use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::hasher::calculate_hash;

/// A single sealed record in the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,     // 1-based
    pub timestamp: i64, // Unix timestamp (UTC), informational only
    pub proof: u64,
    pub previous_hash: String,
    pub hash: String,
    pub proof_of_work: Option<u64>, // None only for genesis
    pub data: Value,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(1, 1, String::from("0"), None, Value::Null)
    }

    /// Create a block and seal it with its content hash.
    pub fn new(
        index: u64,
        proof: u64,
        previous_hash: String,
        proof_of_work: Option<u64>,
        data: Value,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp: Utc::now().timestamp(),
            proof,
            previous_hash,
            hash: String::new(),
            proof_of_work,
            data,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Re-derive the content hash from the stored fields
    /// (everything except `timestamp` and `hash`).
    pub fn compute_hash(&self) -> String {
        calculate_hash(
            self.index,
            &self.previous_hash,
            self.proof,
            self.proof_of_work,
            &self.data,
        )
    }

    /// True when the cached `hash` still matches the block's content.
    pub fn has_valid_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }
}
