use crate::blockchain::{Block, Blockchain, ChainError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared application state owning the in-memory chain.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
}

impl AppState {
    pub fn new(blockchain: Blockchain) -> Self {
        Self {
            blockchain: Mutex::new(blockchain),
        }
    }

    /// Lock the chain. Poisoning is ignored: blocks are pushed whole.
    pub fn chain(&self) -> MutexGuard<'_, Blockchain> {
        self.blockchain
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Mine and append one block.
    ///
    /// The lock is only held to snapshot the head and to append, never during
    /// the search. `append` re-checks against whatever head is current, so a
    /// block that raced in meanwhile is linked to rather than forked from.
    pub fn mine(&self, data: Value) -> Result<Block, ChainError> {
        let job = self.chain().mining_job()?;
        let found = job.solve()?;
        let mut bc = self.chain();
        bc.append(found, data).cloned()
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct BlockResponse {
    pub message: String,
    pub block: Block,
}

#[derive(Deserialize)]
pub struct ModifyRequest {
    #[serde(default = "default_modified_data")]
    pub data: Value,
}

fn default_modified_data() -> Value {
    Value::from("Modified Data")
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::ProofOfWork;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn concurrent_mines_stay_gapless() {
        let state = AppState::new(Blockchain::new(ProofOfWork::new(1)));
        let miners = 8;

        thread::scope(|s| {
            for i in 0..miners {
                let state = &state;
                s.spawn(move || state.mine(json!(format!("miner {i}"))).unwrap());
            }
        });

        let bc = state.chain();
        assert_eq!(bc.len(), miners + 1);
        for (pos, block) in bc.blocks().iter().enumerate() {
            assert_eq!(block.index, pos as u64 + 1);
        }
        for pair in bc.blocks().windows(2) {
            assert_eq!(pair[1].previous_hash, pair[0].hash);
        }
        assert!(bc.is_valid_chain());
    }

    #[test]
    fn reads_are_not_blocked_by_a_running_search() {
        // unsolvable difficulty: the search runs until its iteration cap
        let pow = ProofOfWork::new(64).with_max_iterations(2_000_000);
        let state = AppState::new(Blockchain::new(pow));
        let mining_done = AtomicBool::new(false);

        thread::scope(|s| {
            s.spawn(|| {
                let result = state.mine(json!("slow"));
                mining_done.store(true, Ordering::SeqCst);
                assert!(matches!(result, Err(ChainError::SearchExhausted { .. })));
            });

            thread::sleep(Duration::from_millis(20));
            assert_eq!(state.chain().len(), 1);
            assert!(
                !mining_done.load(Ordering::SeqCst),
                "read waited for the search to finish"
            );
        });

        assert_eq!(state.chain().len(), 1);
    }
}
