pub mod block;
pub mod error;
pub mod hasher;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use error::ChainError;
pub use model::Blockchain;
pub use pow::ProofOfWork;

/// Default Proof-of-Work difficulty (number of leading zero hex chars).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Upper bound on difficulty: the length of a hex SHA-256 digest.
pub const MAX_DIFFICULTY: u32 = 64;

/// Payload label used by the mine entry point.
pub const MINED_BLOCK_LABEL: &str = "Mined Block";

/// Nonce every mine request starts searching from.
pub const MINE_START_PROOF: u64 = 1;
