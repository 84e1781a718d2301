//! Deterministic string → unit interval mapping used by chain selection.

use sha2::{Digest, Sha256};

/// Modulus applied to the digest prefix before scaling into `[0, 1)`.
const UNIT_BASE: u64 = 100_000_000;

/// Map a string to a value in `[0, 1)`.
///
/// SHA-256 of the UTF-8 bytes, first eight digest bytes read as a big-endian
/// integer, reduced modulo 10^8 and divided by 10^8. The result depends only on
/// the input, never on process state.
pub fn hash_to_unit(input: &str) -> f64 {
    let digest = Sha256::digest(input.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let n = u64::from_be_bytes(prefix);
    (n % UNIT_BASE) as f64 / UNIT_BASE as f64
}
