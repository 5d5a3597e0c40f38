//! Random selection helpers
//!
//! All randomness in a session flows through a single injected
//! [`fastrand::Rng`], so a seeded generator replays a session exactly.

use fastrand::Rng;

/// Returns an integer in `[min, max]`, both ends inclusive, uniformly distributed
///
/// `min` must not exceed `max`; if it does, `min` is returned.
pub fn random_int(rng: &mut Rng, min: i64, max: i64) -> i64 {
    if min > max {
        return min;
    }
    rng.i64(min..=max)
}

/// Returns an index in `[0, len)`, or `None` when `len` is zero
pub fn random_index(rng: &mut Rng, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.usize(..len))
}

/// Returns a float uniformly drawn from `[min, max)`
pub fn random_between(rng: &mut Rng, min: f64, max: f64) -> f64 {
    min + rng.f64() * (max - min)
}

/// Shuffles a slice in place with Fisher–Yates and hands it back
pub fn shuffle_in_place<'a, T>(rng: &mut Rng, sequence: &'a mut [T]) -> &'a mut [T] {
    for i in (1..sequence.len()).rev() {
        let j = rng.usize(..=i);
        sequence.swap(i, j);
    }
    sequence
}
