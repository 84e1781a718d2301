//! Deterministic language chain selection
//!
//! A chain is picked one position at a time. Each position hashes
//! `chain|{seed}|{example_id}|{position}` into the unit interval and scales it
//! onto the language pool. When the slot is already taken the value is nudged
//! by [`PERTURBATION`] (wrapping at 1.0) and tried again, at most once per pool
//! entry. If every attempt lands on a used slot the last nudged value is
//! accepted anyway, so selection always terminates.
//!
//! The nudge walks the pool in steps of 2.5 slots and therefore revisits the
//! same ten slots. Chains of up to ten hops never repeat a language; longer
//! chains may.

use crate::mt::hashing::hash_to_unit;
use crate::mt::languages::LANGUAGE_POOL;

/// Amount added to a unit value when its slot is already used
pub const PERTURBATION: f64 = 0.1;

/// Scale a unit value onto a pool index, truncating
fn pool_index(value: f64) -> usize {
    (value * LANGUAGE_POOL.len() as f64) as usize
}

/// Select the ordered language codes for a degradation run
///
/// Returns exactly `max(hops, 0)` codes. The same `(seed, example_id, hops)`
/// always yields the same chain, and a longer chain extends a shorter one.
pub fn select_chain(seed: &str, example_id: i64, hops: i64) -> Vec<&'static str> {
    if hops <= 0 {
        return Vec::new();
    }

    let pool_size = LANGUAGE_POOL.len();
    let mut used = [false; LANGUAGE_POOL.len()];
    let mut codes = Vec::with_capacity(hops as usize);

    for position in 0..hops {
        let mut value = hash_to_unit(&format!("chain|{}|{}|{}", seed, example_id, position));

        let mut attempts = 0;
        while attempts < pool_size {
            let idx = pool_index(value);
            if !used[idx] {
                used[idx] = true;
                codes.push(LANGUAGE_POOL[idx].code);
                break;
            }
            value = (value + PERTURBATION) % 1.0;
            attempts += 1;
        }

        if attempts >= pool_size {
            codes.push(LANGUAGE_POOL[pool_index(value)].code);
        }
    }

    codes
}
