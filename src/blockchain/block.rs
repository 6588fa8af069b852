use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hash::sha256_hex;
use crate::transaction::Transaction;

/// A sealed, immutable unit of the chain: an ordered batch of transactions,
/// the proof that gated its creation, and the content hash of its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based, sequential position in the chain.
    pub index: u64,
    /// Seconds since the Unix epoch (UTC), with subsecond precision.
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    /// Hex digest of the preceding block, or the genesis sentinel.
    pub previous_hash: String,
}

impl Block {
    /// Build a block stamped with the current wall-clock time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Compute the SHA-256 content hash of this block.
    ///
    /// The preimage is a canonical encoding with fixed field order (index,
    /// timestamp, transactions, proof, previous_hash); transactions are
    /// serialized as compact JSON. Two blocks with identical field values
    /// produce byte-identical preimages on any node, which makes the digest
    /// usable for cross-node linkage verification.
    pub fn hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.index, self.timestamp, txs_json, self.proof, self.previous_hash
        );
        sha256_hex(preimage.as_bytes())
    }
}
