use log::{debug, warn};
use serde_json::Value;

use super::{Block, ChainError, MINE_START_PROOF, ProofOfWork, validator};

/// Proof-of-work search detached from the chain, so it can run without
/// holding the chain lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningJob {
    pub pow: ProofOfWork,
    pub prev_proof: u64,
}

impl MiningJob {
    /// Search from nonce 1 against the snapshotted head's proof.
    pub fn solve(&self) -> Result<u64, ChainError> {
        let (found, _) = self.pow.search(self.prev_proof, MINE_START_PROOF)?;
        Ok(found)
    }
}

/// Simple in-memory blockchain with Proof-of-Work.
///
/// Single-writer: callers sharing a chain must serialise mutation themselves.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    pow: ProofOfWork,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new(pow: ProofOfWork) -> Self {
        Self {
            chain: vec![Block::genesis()],
            pow,
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block, ChainError> {
        self.chain.last().ok_or(ChainError::EmptyChain)
    }

    /// Look up a block by its 1-based index.
    pub fn get(&self, index: u64) -> Result<&Block, ChainError> {
        let pos = self.position(index)?;
        Ok(&self.chain[pos])
    }

    /// Seal and append a block whose proof-of-work search starts at `proof`.
    ///
    /// The block stores `proof` as given and the discovered nonce as
    /// `proof_of_work`.
    pub fn append(&mut self, proof: u64, data: Value) -> Result<&Block, ChainError> {
        let last = self.last_block()?;
        let (found, digest) = self.pow.search(last.proof, proof)?;
        let index = last.index + 1;

        let block = Block::new(index, proof, last.hash.clone(), Some(found), data);
        debug!("CHAIN - appending block #{index} (proof={proof}, pow={found}, digest={digest})");

        self.chain.push(block);
        self.last_block()
    }

    /// Snapshot what a miner needs to search for the next block's nonce.
    pub fn mining_job(&self) -> Result<MiningJob, ChainError> {
        Ok(MiningJob {
            pow: self.pow,
            prev_proof: self.last_block()?.proof,
        })
    }

    /// Overwrite the payload of the block at 1-based `index` and recompute
    /// only that block's hash.
    ///
    /// Successors are not re-linked, so this breaks validation for any block
    /// after the modified one.
    pub fn modify_block(&mut self, index: u64, data: Value) -> Result<&Block, ChainError> {
        let pos = self.position(index)?;
        let block = &mut self.chain[pos];
        block.data = data;
        block.hash = block.compute_hash();
        warn!("CHAIN - block #{index} modified in place; later links are now stale");
        Ok(&self.chain[pos])
    }

    /// Validate the entire chain: linkage, hashes and PoW.
    pub fn is_valid_chain(&self) -> bool {
        validator::is_valid(&self.chain, &self.pow)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.pow.difficulty
    }

    fn position(&self, index: u64) -> Result<usize, ChainError> {
        let len = self.chain.len();
        match usize::try_from(index) {
            Ok(i) if (1..=len).contains(&i) => Ok(i - 1),
            _ => Err(ChainError::InvalidIndex { index, len }),
        }
    }
}
