//! Li's Algorithm L skip-count generator
//!
//! Algorithm L observes that the smallest of the k "virtual keys" in the
//! reservoir follows a Beta-like law summarized by a single scalar `W`,
//! which makes the gap to the next acceptance a closed-form function of two
//! uniforms. Three draws per acceptance, independent of the gap length.
//!
//! # References
//!
//! - Li, K-H. (1994). "Reservoir-sampling algorithms of time complexity
//!   O(n(1 + log(N/n)))"

use rand::RngCore;

use crate::common::random::random_open01;
use crate::common::{Result, SampleError};
use crate::skip::SkipGenerator;

/// One Algorithm L step: the skip implied by the current `W` and the next
/// value of `W`.
///
/// Shared with the lock-free engine, which keeps `W` in an atomic bit
/// pattern instead of a struct field. A `W` small enough that `1 - W`
/// rounds to 1 drives the skip to negative infinity; that and any gap past
/// `u64::MAX` surface as stream overflow.
pub(crate) fn li_l_step(sample_size: f64, w: f64, r1: f64, r2: f64) -> Result<(u64, f64)> {
    let gap = r1.ln() / (1.0 - w).ln();
    if !gap.is_finite() || gap >= u64::MAX as f64 {
        return Err(SampleError::StreamOverflow);
    }
    Ok((gap as u64, w * r2.powf(1.0 / sample_size)))
}

/// Skip-count generator for Algorithm L.
///
/// State is the scalar `W` in (0, 1), lazily initialized to `U^(1/k)` on
/// the first call. Unlike the Vitter generators there is no stream
/// counter: the skip law depends on the stream position only through `W`.
#[derive(Clone, Debug)]
pub struct LiLSkip {
    sample_size: u64,
    w: Option<f64>,
}

impl SkipGenerator for LiLSkip {
    fn for_sample_size(sample_size: u64) -> Self {
        LiLSkip {
            sample_size,
            w: None,
        }
    }

    fn next_skip(&mut self, rng: &mut dyn RngCore) -> Result<u64> {
        let k = self.sample_size as f64;
        let w = match self.w {
            Some(w) => w,
            None => random_open01(rng).powf(1.0 / k),
        };
        let r1 = random_open01(rng);
        let r2 = random_open01(rng);
        let (skip, next_w) = li_l_step(k, w, r1, r2)?;
        self.w = Some(next_w);
        Ok(skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_sequences_match() {
        let mut rng1 = SmallRng::seed_from_u64(42);
        let mut rng2 = SmallRng::seed_from_u64(42);
        let mut gen1 = LiLSkip::for_sample_size(10);
        let mut gen2 = LiLSkip::for_sample_size(10);

        for _ in 0..500 {
            assert_eq!(
                gen1.next_skip(&mut rng1).unwrap(),
                gen2.next_skip(&mut rng2).unwrap()
            );
        }
    }

    #[test]
    fn test_vanishing_w_signals_overflow() {
        // 1 - W rounds to exactly 1, ln(1 - W) is zero, and the implied
        // gap is no longer representable.
        let result = li_l_step(10.0, 1e-300, 0.5, 0.5);
        assert_eq!(result, Err(SampleError::StreamOverflow));
    }

    #[test]
    fn test_w_shrinks_monotonically() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut generator = LiLSkip::for_sample_size(10);
        generator.next_skip(&mut rng).unwrap();
        let mut previous = generator.w.unwrap();
        for _ in 0..100 {
            generator.next_skip(&mut rng).unwrap();
            let current = generator.w.unwrap();
            assert!(current < previous);
            assert!(current > 0.0);
            previous = current;
        }
    }

    #[test]
    fn test_mean_gap_matches_waterman_early() {
        let calls = 30;
        let trials = 200;

        let mut total_l = 0u64;
        let mut total_r = 0u64;
        for seed in 0..trials {
            let mut rng_l = SmallRng::seed_from_u64(seed);
            let mut rng_r = SmallRng::seed_from_u64(seed + 20_000);
            let mut l = LiLSkip::for_sample_size(8);
            let mut r = crate::skip::WatermanSkip::for_sample_size(8);
            for _ in 0..calls {
                total_l += l.next_skip(&mut rng_l).unwrap();
                total_r += r.next_skip(&mut rng_r).unwrap();
            }
        }

        let ratio = total_l as f64 / total_r as f64;
        assert!(
            (0.6..1.7).contains(&ratio),
            "mean gaps diverged: {} vs {}",
            total_l,
            total_r
        );
    }
}
