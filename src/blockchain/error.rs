use thiserror::Error;

/// Contract violations surfaced by chain operations.
///
/// Validation failures are not errors; see [`super::validator::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("chain has no blocks")]
    EmptyChain,

    #[error("block index {index} out of range (chain length {len})")]
    InvalidIndex { index: u64, len: usize },

    #[error("proof-of-work candidate {candidate} overflows the search range")]
    SearchOverflow { candidate: u64 },

    #[error("proof-of-work search gave up after {iterations} iterations")]
    SearchExhausted { iterations: u64 },
}
