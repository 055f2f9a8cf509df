//! Efraimidis-Spirakis A-Res order sampling
//!
//! Key distribution `r^(1/w)` with `r` uniform in (0, 1): the classic
//! weighted reservoir scheme in which an item's chance of out-keying
//! another doubles when its weight doubles relative to the remaining
//! stream.
//!
//! # References
//!
//! - Efraimidis, P. S., Spirakis, P. G. (2006). "Weighted random sampling
//!   with a reservoir"

use rand::RngCore;

use crate::common::random::random_open01;
use crate::weighted::order::{OrderSampler, OrderScheme};

/// The A-Res key distribution: `key = r^(1/w)`.
///
/// Accepts weights in `(0, +Inf)`; the default weight is 1, under which
/// the engine degrades to uniform sampling. Tiny weights can round the key
/// to exactly 0 and enormous ones to exactly 1; both are tolerated.
#[derive(Clone, Copy, Debug, Default)]
pub struct ARes;

impl OrderScheme for ARes {
    const DEFAULT_WEIGHT: f64 = 1.0;
    const WEIGHT_RANGE: &'static str = "(0, +Inf)";

    fn is_weight_valid(weight: f64) -> bool {
        weight > 0.0 && weight.is_finite()
    }

    fn key(weight: f64, rng: &mut dyn RngCore) -> f64 {
        random_open01(rng).powf(1.0 / weight)
    }
}

/// Weighted reservoir sampling with the A-Res scheme.
pub type EfraimidisSampler<T> = OrderSampler<T, ARes>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SampleError;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_weight_validation() {
        assert!(ARes::is_weight_valid(1.0));
        assert!(ARes::is_weight_valid(f64::MIN_POSITIVE));
        assert!(ARes::is_weight_valid(f64::MAX));
        assert!(!ARes::is_weight_valid(0.0));
        assert!(!ARes::is_weight_valid(-1.0));
        assert!(!ARes::is_weight_valid(f64::NAN));
        assert!(!ARes::is_weight_valid(f64::INFINITY));
    }

    #[test]
    fn test_keys_stay_in_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(42);
        for weight in [f64::MIN_POSITIVE, 0.5, 1.0, 100.0, f64::MAX] {
            for _ in 0..100 {
                let key = ARes::key(weight, &mut rng);
                assert!((0.0..=1.0).contains(&key), "key {} for weight {}", key, weight);
            }
        }
    }

    #[test]
    fn test_illegal_weight_error_carries_range() {
        let mut sampler: EfraimidisSampler<i32> = EfraimidisSampler::with_seed(2, 1).unwrap();
        let err = sampler.feed_weighted(1, f64::NAN).unwrap_err();
        match err {
            SampleError::IllegalWeight { range, .. } => assert_eq!(range, "(0, +Inf)"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(sampler.stream_size(), 0);
    }

    #[test]
    fn test_heavier_weight_usually_wins() {
        // k = 1 over two items: the heavier one should dominate.
        let mut heavy_wins = 0;
        for seed in 0..2_000 {
            let mut sampler: EfraimidisSampler<&str> =
                EfraimidisSampler::with_seed(1, seed).unwrap();
            sampler.feed_weighted("light", 1.0).unwrap();
            sampler.feed_weighted("heavy", 20.0).unwrap();
            if sampler.sample().next() == Some(&"heavy") {
                heavy_wins += 1;
            }
        }
        // Expected win rate is 20/21; allow a generous band.
        assert!(heavy_wins > 1_700, "heavy won only {} times", heavy_wins);
    }
}
