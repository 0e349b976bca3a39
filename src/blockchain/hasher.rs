use serde_json::Value;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes` (64 chars).
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Content hash of a block's stable fields.
///
/// Preimage layout is `index:previous_hash:proof:proof_of_work:data`, with a
/// missing `proof_of_work` written as `null` and `data` as compact JSON.
/// The timestamp is not part of the preimage.
pub fn calculate_hash(
    index: u64,
    previous_hash: &str,
    proof: u64,
    proof_of_work: Option<u64>,
    data: &Value,
) -> String {
    let pow = proof_of_work.map_or_else(|| "null".to_string(), |p| p.to_string());
    let preimage = format!("{index}:{previous_hash}:{proof}:{pow}:{data}");
    sha256_hex(preimage.as_bytes())
}
