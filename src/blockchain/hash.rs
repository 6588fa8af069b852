use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of `data`.
///
/// This is the consensus primitive: block linkage compares these digests and
/// the proof-of-work difficulty check inspects their leading hex digits, so
/// the output must be identical on every node for identical input bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
