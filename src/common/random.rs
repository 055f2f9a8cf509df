//! Shared randomness helpers for the sampling engines

use rand::{Rng, RngCore};

/// Draws a uniform value in the open interval `(0, 1)`.
///
/// Several engines compute `log(u)` or `u^x` for non-integer `x` and cannot
/// tolerate a zero draw; they must route through this helper rather than the
/// underlying generator. Redraws until the `[0, 1)` sample is nonzero.
pub fn random_open01<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u > 0.0 {
            return u;
        }
    }
}

/// Samples an index from a discrete distribution by prefix-sum scan.
///
/// Given probabilities `p_0..p_m` with sum at most 1 and a uniform draw `u`,
/// returns the least index whose running prefix sum exceeds `u`, or `None`
/// when the total never does (`u` landed past the distribution's mass).
/// Linear in the number of probabilities.
pub fn weighted_random_selection(probabilities: &[f64], u: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (index, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative > u {
            return Some(index);
        }
    }
    None
}
