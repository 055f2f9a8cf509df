//! Sequential Poisson order sampling
//!
//! Key distribution `w/r`: the reciprocal of Ohlsson's ranking variable
//! `r/w`, stored so that a larger key is better like the other schemes.
//! Sequential Poisson sampling approximates probability-proportional-to-
//! size sampling and is the scheme behind many survey-sampling systems.
//!
//! # References
//!
//! - Ohlsson, E. (1998). "Sequential Poisson sampling"

use rand::RngCore;

use crate::common::random::random_open01;
use crate::weighted::order::{OrderSampler, OrderScheme};

/// The Sequential Poisson key distribution: `key = w/r`.
///
/// Accepts weights in `(0, +Inf)`; the default weight is 1. The quotient
/// can overflow to infinity at extreme weights, which the engine clamps to
/// the finite maximum.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialPoisson;

impl OrderScheme for SequentialPoisson {
    const DEFAULT_WEIGHT: f64 = 1.0;
    const WEIGHT_RANGE: &'static str = "(0, +Inf)";

    fn is_weight_valid(weight: f64) -> bool {
        weight > 0.0 && weight.is_finite()
    }

    fn key(weight: f64, rng: &mut dyn RngCore) -> f64 {
        weight / random_open01(rng)
    }
}

/// Weighted reservoir sampling with the Sequential Poisson scheme.
pub type SequentialPoissonSampler<T> = OrderSampler<T, SequentialPoisson>;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_weight_validation() {
        assert!(SequentialPoisson::is_weight_valid(1.0));
        assert!(SequentialPoisson::is_weight_valid(f64::MAX));
        assert!(!SequentialPoisson::is_weight_valid(0.0));
        assert!(!SequentialPoisson::is_weight_valid(-0.5));
        assert!(!SequentialPoisson::is_weight_valid(f64::NAN));
        assert!(!SequentialPoisson::is_weight_valid(f64::INFINITY));
    }

    #[test]
    fn test_key_scales_with_weight() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let key = SequentialPoisson::key(3.0, &mut rng);
            assert!(key >= 3.0);
        }
    }

    #[test]
    fn test_extreme_weights_do_not_error() {
        let mut sampler: SequentialPoissonSampler<i32> =
            SequentialPoissonSampler::with_seed(2, 5).unwrap();
        sampler.feed_weighted(1, f64::MIN_POSITIVE).unwrap();
        sampler.feed_weighted(2, f64::MAX).unwrap();
        sampler.feed_weighted(3, f64::MAX).unwrap();
        assert_eq!(sampler.len(), 2);
    }

    #[test]
    fn test_heavier_weight_usually_wins() {
        let mut heavy_wins = 0;
        for seed in 0..2_000 {
            let mut sampler: SequentialPoissonSampler<&str> =
                SequentialPoissonSampler::with_seed(1, seed).unwrap();
            sampler.feed_weighted("light", 1.0).unwrap();
            sampler.feed_weighted("heavy", 20.0).unwrap();
            if sampler.sample().next() == Some(&"heavy") {
                heavy_wins += 1;
            }
        }
        assert!(heavy_wins > 1_700, "heavy won only {} times", heavy_wins);
    }
}
