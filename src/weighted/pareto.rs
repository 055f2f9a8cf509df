//! Pareto order sampling
//!
//! Key distribution `(r*w) / ((1-r)*(1-w))` over weights in (0, 1): the
//! reciprocal of Rosen's ranking variable, stored so that a larger key is
//! better and the weight acts as a target inclusion probability. Among the
//! order-sampling schemes Pareto comes closest to strict
//! probability-proportional-to-size inclusion.
//!
//! # References
//!
//! - Rosen, B. (1997). "On sampling with probability proportional to size"

use rand::RngCore;

use crate::common::random::random_open01;
use crate::weighted::order::{OrderSampler, OrderScheme};

/// The Pareto key distribution: `key = (r*w) / ((1-r)*(1-w))`.
///
/// Accepts weights strictly between 0 and 1. The documented default
/// weight is 0.5, which makes unweighted feeding a degenerate equal-key
/// stream; feed explicit weights for any meaningful bias.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pareto;

impl OrderScheme for Pareto {
    const DEFAULT_WEIGHT: f64 = 0.5;
    const WEIGHT_RANGE: &'static str = "(0, 1)";

    fn is_weight_valid(weight: f64) -> bool {
        weight > 0.0 && weight < 1.0
    }

    fn key(weight: f64, rng: &mut dyn RngCore) -> f64 {
        let r = random_open01(rng);
        (r * weight) / ((1.0 - r) * (1.0 - weight))
    }
}

/// Weighted reservoir sampling with the Pareto scheme.
pub type ParetoSampler<T> = OrderSampler<T, Pareto>;
