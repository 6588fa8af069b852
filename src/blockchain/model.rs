use log::{debug, info};

use super::pow::{proof_of_work, valid_proof};
use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, MINING_REWARD, MINING_SENDER};
use crate::transaction::Transaction;

/// In-memory chain store: the append-only block sequence plus the pool of
/// transactions awaiting inclusion in the next mined block.
///
/// The store is single-owner. Callers exposing it to concurrent requests must
/// wrap it in a mutex so at most one structural mutation is in flight at a
/// time; the pool and the chain are mutated together under that exclusion, so
/// no reader can observe a sealed block without the pool already drained.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Blockchain {
    /// Initialize a chain seeded with its genesis block
    /// (proof 100, sentinel previous-hash, no transactions).
    pub fn new() -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        bc.create_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        bc
    }

    /// Seal a new block over the entire pending pool and append it.
    ///
    /// When `previous_hash` is omitted it is computed from the last block.
    /// The pool is drained in the same call.
    pub fn create_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let block = Block::new(
            self.chain.len() as u64 + 1,
            std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        debug!(
            "CHAIN - sealed block #{} ({} txs)",
            block.index,
            block.transactions.len()
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Queue a transaction for the next mined block and return the index of
    /// the block that will contain it.
    pub fn create_transaction(&mut self, sender: &str, recipient: &str, amount: i64) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.last_block().index + 1
    }

    /// The most recently appended block.
    ///
    /// Panics on an empty chain: `new` always seeds a genesis block, so an
    /// empty chain is a construction bug rather than a runtime condition.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain must hold at least the genesis block")
    }

    /// Transactions awaiting inclusion, in submission order.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Credit the mining reward to `recipient` and seal a block with `proof`.
    pub fn seal_block(&mut self, proof: u64, recipient: &str) -> &Block {
        self.create_transaction(MINING_SENDER, recipient, MINING_REWARD);
        let block = self.create_block(proof, None);
        info!("MINER - forged block #{} (proof={})", block.index, block.proof);
        block
    }

    /// The full mining write path: search a proof over the last block's proof,
    /// then seal. Blocks the calling thread for the whole search; the HTTP
    /// layer splits these steps around its blocking pool instead.
    pub fn mine(&mut self, recipient: &str) -> &Block {
        let proof = proof_of_work(self.last_block().proof);
        self.seal_block(proof, recipient)
    }

    /// Replace the local chain wholesale (consensus adoption).
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        info!(
            "CHAIN - replacing local chain ({} -> {} blocks)",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
    }

    /// Validate an arbitrary chain: every adjacent pair must link by content
    /// hash and carry a proof valid against its predecessor's. Chains of zero
    /// or one blocks are trivially valid.
    pub fn valid_chain(chain: &[Block]) -> bool {
        for pair in chain.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            if cur.previous_hash != prev.hash() {
                debug!("CHAIN - broken linkage at block #{}", cur.index);
                return false;
            }
            if !valid_proof(prev.proof, cur.proof) {
                debug!("CHAIN - invalid proof at block #{}", cur.index);
                return false;
            }
        }
        true
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}
