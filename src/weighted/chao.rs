//! Chao's strictly proportional weighted reservoir sampling
//!
//! Every fed item's first-order inclusion probability is exactly
//! `min(1, k * w / sum(w))` at every point in the stream. The price is
//! bookkeeping the order-sampling schemes avoid: items whose inclusion
//! probability reaches 1 are forced into the sample ("overweight"), and
//! each feed re-evaluates the forced set against the grown weight sum,
//! demoting entries whose probability has dropped back below 1.
//!
//! The forced set is a vector kept sorted by weight, largest first, which
//! is the right trade for the small k this engine is built around;
//! demotion during the downward scan is staged through a separate list so
//! the scan never removes behind itself.
//!
//! # References
//!
//! - Chao, M-T. (1982). "A general purpose unequal probability sampling
//!   plan"

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::random::weighted_random_selection;
use crate::common::validation::validate_sample_size;
use crate::common::{Result, SampleError};

const WEIGHT_RANGE: &str = "(0, +Inf)";

/// Strictly proportional weighted reservoir sampling.
///
/// # Examples
///
/// ```
/// use reservoir_oxide::ChaoSampler;
///
/// let mut sampler: ChaoSampler<u32> = ChaoSampler::new(5).unwrap();
/// for i in 0..100 {
///     sampler.feed_weighted(i, (i + 1) as f64).unwrap();
/// }
///
/// assert_eq!(sampler.sample().count(), 5);
/// assert_eq!(sampler.stream_size(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct ChaoSampler<T> {
    /// Maximum number of items to store
    sample_size: usize,
    /// Forced-in items with inclusion probability 1, sorted by weight
    /// descending
    overweight: Vec<(T, f64)>,
    /// Probabilistically retained items
    feasible: Vec<T>,
    /// Sum of all weights fed
    weight_sum: f64,
    /// Total number of items fed
    stream_size: u64,
    /// Random number generator
    rng: SmallRng,
}

impl<T> ChaoSampler<T> {
    /// Creates a sampler holding up to `sample_size` items.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `sample_size` is 0.
    pub fn new(sample_size: usize) -> Result<Self> {
        Self::with_rng(sample_size, SmallRng::from_os_rng())
    }

    /// Creates a sampler with a seed for reproducibility.
    pub fn with_seed(sample_size: usize, seed: u64) -> Result<Self> {
        Self::with_rng(sample_size, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(sample_size: usize, rng: SmallRng) -> Result<Self> {
        validate_sample_size(sample_size)?;
        Ok(ChaoSampler {
            sample_size,
            overweight: Vec::with_capacity(sample_size),
            feasible: Vec::with_capacity(sample_size),
            weight_sum: 0.0,
            stream_size: 0,
            rng,
        })
    }

    /// Feeds one item with weight 1.
    ///
    /// # Errors
    ///
    /// As for [`feed_weighted`](ChaoSampler::feed_weighted).
    pub fn feed(&mut self, item: T) -> Result<bool> {
        self.feed_weighted(item, 1.0)
    }

    /// Feeds one weighted item, returning whether the sample changed.
    ///
    /// # Errors
    ///
    /// Returns `IllegalWeight` for weights that are not strictly positive
    /// and finite, and `StreamOverflow` when the stream counter or the
    /// weight sum saturates; the sampler is unusable after an overflow.
    pub fn feed_weighted(&mut self, item: T, weight: f64) -> Result<bool> {
        if !(weight > 0.0 && weight.is_finite()) {
            return Err(SampleError::IllegalWeight {
                weight,
                range: WEIGHT_RANGE,
            });
        }
        if self.stream_size == u64::MAX || !(self.weight_sum + weight).is_finite() {
            return Err(SampleError::StreamOverflow);
        }
        self.stream_size += 1;
        self.weight_sum += weight;

        // The first k items are all forced in; later feeds demote them as
        // the weight sum grows.
        if self.stream_size <= self.sample_size as u64 {
            self.insert_overweight(item, weight);
            self.debug_check();
            return Ok(true);
        }

        let k = self.sample_size as f64;
        let w = weight * k / self.weight_sum;
        let new_overweight = w >= 1.0;

        // Re-evaluate the forced set from the largest weight down. Entries
        // that remain forced join the "impossible" mass excluded from the
        // proportional pool; the rest are demoted with a drop density.
        let (mut impossible_count, mut impossible_sum) = if new_overweight {
            (1.0, weight)
        } else {
            (0.0, 0.0)
        };
        let mut retained = Vec::with_capacity(self.overweight.len());
        let mut possible: Vec<T> = Vec::new();
        let mut densities: Vec<f64> = Vec::new();
        for (existing, existing_weight) in self.overweight.drain(..) {
            let revised =
                existing_weight * (k - impossible_count) / (self.weight_sum - impossible_sum);
            if revised >= 1.0 {
                impossible_count += 1.0;
                impossible_sum += existing_weight;
                retained.push((existing, existing_weight));
            } else {
                densities.push((1.0 - revised) / w.min(1.0));
                possible.push(existing);
            }
        }
        self.overweight = retained;

        let add = self.rng.random::<f64>();
        let accepted = w > add;
        if accepted {
            // One current member must leave: a demoted entry picked by
            // drop density, or failing that a uniform feasible entry.
            let u = self.rng.random::<f64>();
            if let Some(index) = weighted_random_selection(&densities, u) {
                possible.swap_remove(index);
            } else if !self.feasible.is_empty() {
                let evicted = self.rng.random_range(0..self.feasible.len());
                self.feasible.swap_remove(evicted);
            } else {
                // Rounding left the density sum just under the draw; every
                // candidate is in `possible`.
                possible.pop();
            }
        }

        if new_overweight {
            self.insert_overweight(item, weight);
        } else if accepted {
            self.feasible.push(item);
        }
        self.feasible.append(&mut possible);

        self.debug_check();
        Ok(accepted)
    }

    /// Feeds every item of a sequence with weight 1.
    pub fn feed_iter<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let mut changed = false;
        for item in items {
            changed |= self.feed(item)?;
        }
        Ok(changed)
    }

    /// Feeds every `(item, weight)` pair of a sequence.
    pub fn feed_weighted_iter<I>(&mut self, pairs: I) -> Result<bool>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut changed = false;
        for (item, weight) in pairs {
            changed |= self.feed_weighted(item, weight)?;
        }
        Ok(changed)
    }

    /// Feeds items and weights from two parallel sequences.
    ///
    /// # Errors
    ///
    /// Returns `MismatchedLengths` when one sequence runs out before the
    /// other; every pair fed up to that point stays in effect.
    pub fn feed_zipped<I, W>(&mut self, items: I, weights: W) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
        W: IntoIterator<Item = f64>,
    {
        let mut items = items.into_iter();
        let mut weights = weights.into_iter();
        let mut changed = false;
        let mut fed = 0u64;
        loop {
            match (items.next(), weights.next()) {
                (Some(item), Some(weight)) => {
                    changed |= self.feed_weighted(item, weight)?;
                    fed += 1;
                }
                (None, None) => return Ok(changed),
                (Some(_), None) => {
                    return Err(SampleError::MismatchedLengths {
                        items: fed + 1,
                        weights: fed,
                    })
                }
                (None, Some(_)) => {
                    return Err(SampleError::MismatchedLengths {
                        items: fed,
                        weights: fed + 1,
                    })
                }
            }
        }
    }

    /// Returns the current sample: the probabilistic part followed by the
    /// forced-in part.
    pub fn sample(&self) -> impl Iterator<Item = &T> {
        self.feasible
            .iter()
            .chain(self.overweight.iter().map(|(item, _)| item))
    }

    /// Returns the current sample as an owned vector.
    pub fn into_sample(self) -> Vec<T> {
        let mut items = self.feasible;
        items.extend(self.overweight.into_iter().map(|(item, _)| item));
        items
    }

    /// Returns the configured sample size `k`.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Returns the number of items fed since construction.
    pub fn stream_size(&self) -> u64 {
        self.stream_size
    }

    /// Returns the sum of all weights fed.
    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    /// Returns the number of items currently retained.
    pub fn len(&self) -> usize {
        self.overweight.len() + self.feasible.len()
    }

    /// Returns true if no items have been fed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_overweight(&mut self, item: T, weight: f64) {
        let position = self
            .overweight
            .partition_point(|(_, existing)| *existing >= weight);
        self.overweight.insert(position, (item, weight));
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.len() as u64,
            (self.sample_size as u64).min(self.stream_size),
            "partition sizes drifted from min(k, stream size)"
        );
        debug_assert!(
            self.overweight
                .windows(2)
                .all(|pair| pair[0].1 >= pair[1].1),
            "forced set no longer sorted by weight"
        );
    }
}
