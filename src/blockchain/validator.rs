use log::debug;

use super::{Block, ProofOfWork};

/// Walk the chain and check every block against its predecessor.
///
/// A chain is valid when:
/// - the genesis block has index 1, `previous_hash == "0"` and no `proof_of_work`,
/// - every stored hash matches the block's re-derived content hash,
/// - each `previous_hash` equals the re-derived hash of the prior block,
/// - indices increase by exactly one,
/// - each `proof_of_work` solves the puzzle against the prior block's `proof`.
///
/// An empty slice is not a chain and is rejected.
pub fn is_valid(chain: &[Block], pow: &ProofOfWork) -> bool {
    let Some(genesis) = chain.first() else {
        return false;
    };
    if genesis.index != 1
        || genesis.previous_hash != "0"
        || genesis.proof_of_work.is_some()
        || !genesis.has_valid_hash()
    {
        debug!("VALIDATE - genesis block rejected");
        return false;
    }

    for pair in chain.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);

        if current.previous_hash != prev.compute_hash() {
            debug!("VALIDATE - block #{} breaks hash linkage", current.index);
            return false;
        }
        if !current.has_valid_hash() {
            debug!("VALIDATE - block #{} has a stale hash", current.index);
            return false;
        }
        if prev.index.checked_add(1) != Some(current.index) {
            debug!("VALIDATE - block #{} breaks index sequence", current.index);
            return false;
        }
        let solved = current
            .proof_of_work
            .is_some_and(|nonce| pow.is_solution(nonce, prev.proof));
        if !solved {
            debug!("VALIDATE - block #{} fails proof-of-work", current.index);
            return false;
        }
    }

    true
}
