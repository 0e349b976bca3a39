use log::{debug, warn};

use super::ChainError;
use super::hasher::sha256_hex;

/// Proof-of-Work engine.
///
/// A candidate `new_proof` solves the puzzle for `prev_proof` when
/// `sha256_hex(new_proof^2 - prev_proof^2)` starts with `difficulty` zeros.
/// The difference is hashed as its signed decimal ASCII form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    pub difficulty: u32,
    /// Optional cap on candidates tried per search; `None` searches forever.
    pub max_iterations: Option<u64>,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self {
            difficulty,
            max_iterations: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Digest of the puzzle for the pair, or `None` if the arithmetic overflows.
    pub fn digest(new_proof: u64, prev_proof: u64) -> Option<String> {
        let new_sq = i128::from(new_proof).checked_mul(i128::from(new_proof))?;
        let prev_sq = i128::from(prev_proof).checked_mul(i128::from(prev_proof))?;
        let diff = new_sq.checked_sub(prev_sq)?;
        Some(sha256_hex(diff.to_string().as_bytes()))
    }

    pub fn meets_difficulty(&self, digest: &str) -> bool {
        let needed = self.difficulty as usize;
        digest.len() >= needed && digest.bytes().take(needed).all(|b| b == b'0')
    }

    /// Check the difficulty predicate for a single pair.
    pub fn is_solution(&self, new_proof: u64, prev_proof: u64) -> bool {
        Self::digest(new_proof, prev_proof).is_some_and(|d| self.meets_difficulty(&d))
    }

    /// Find the first `new_proof >= start_proof` solving the puzzle for
    /// `prev_proof`. Returns the proof and its digest.
    pub fn search(&self, prev_proof: u64, start_proof: u64) -> Result<(u64, String), ChainError> {
        let mut candidate = start_proof;
        let mut iterations: u64 = 0;
        loop {
            if let Some(max) = self.max_iterations {
                if iterations >= max {
                    warn!(
                        "POW - search exhausted after {iterations} iterations (prev_proof={prev_proof}, start={start_proof})"
                    );
                    return Err(ChainError::SearchExhausted { iterations });
                }
            }

            let digest = Self::digest(candidate, prev_proof)
                .ok_or(ChainError::SearchOverflow { candidate })?;
            if self.meets_difficulty(&digest) {
                debug!(
                    "POW - found proof {candidate} after {} tries (difficulty={})",
                    iterations + 1,
                    self.difficulty
                );
                return Ok((candidate, digest));
            }

            candidate = candidate
                .checked_add(1)
                .ok_or(ChainError::SearchOverflow { candidate })?;
            iterations += 1;
        }
    }
}
