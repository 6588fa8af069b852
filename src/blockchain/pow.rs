use log::debug;

use super::DIFFICULTY_PREFIX;
use super::hash::sha256_hex;

/// Check whether `proof` solves the puzzle for `last_proof`: the SHA-256 of
/// the concatenated decimal representations must start with four zero hex
/// digits. Pure function of its inputs, so any node can verify another
/// node's work.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{}{}", last_proof, proof);
    sha256_hex(guess.as_bytes()).starts_with(DIFFICULTY_PREFIX)
}

/// Brute-force the smallest proof satisfying `valid_proof(last_proof, _)`,
/// searching 0, 1, 2, ... in order.
///
/// CPU-bound and unbounded: the loop only exits on success. Callers on an
/// async executor must dispatch this to a blocking thread (see the /mine
/// handler) so chain queries and transaction submission stay responsive.
pub fn proof_of_work(last_proof: u64) -> u64 {
    let mut proof: u64 = 0;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    debug!("POW - solved last_proof={} with proof={}", last_proof, proof);
    proof
}
