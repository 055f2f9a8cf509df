//! The key-ordered weighted engine
//!
//! Order sampling: every incoming item is assigned an independent key
//! drawn from a weight-dependent distribution, and the sample is the set
//! of the k largest keys seen so far. A bounded min-heap keeps the
//! currently smallest retained key at the root, so each feed is a single
//! comparison plus, on acceptance, an O(log k) heap replacement.
//!
//! The engine is generic over an [`OrderScheme`], which supplies the key
//! distribution, the accepted weight range, and the default weight used
//! when feeding without an explicit weight.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::common::validation::validate_sample_size;
use crate::common::{Result, SampleError};
use crate::weighted::item::WeightedItem;

/// A key distribution for order sampling.
///
/// Implementations are zero-sized marker types; the engine calls the
/// associated functions with its own random source.
pub trait OrderScheme {
    /// Weight used when the engine is fed without an explicit weight.
    const DEFAULT_WEIGHT: f64;

    /// Human-readable accepted weight range, quoted in error messages.
    const WEIGHT_RANGE: &'static str;

    /// Returns whether the scheme accepts `weight`.
    fn is_weight_valid(weight: f64) -> bool;

    /// Draws the sort key for an item of the given weight.
    ///
    /// Keys are non-negative; a larger key is better. Exact 0 or 1 can
    /// occur through floating-point rounding at extreme weights and is
    /// tolerated.
    fn key(weight: f64, rng: &mut dyn RngCore) -> f64;
}

/// Weight-biased reservoir sampling by order of generated keys.
///
/// The probability that an item enters the sample grows with its weight;
/// the exact inclusion profile depends on the scheme's key distribution.
///
/// # Examples
///
/// ```
/// use reservoir_oxide::EfraimidisSampler;
///
/// let mut sampler: EfraimidisSampler<&str> = EfraimidisSampler::new(2).unwrap();
/// sampler.feed_weighted("rare", 1.0).unwrap();
/// sampler.feed_weighted("common", 10.0).unwrap();
/// sampler.feed_weighted("dominant", 100.0).unwrap();
///
/// assert_eq!(sampler.sample().count(), 2);
/// assert_eq!(sampler.stream_size(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct OrderSampler<T, S: OrderScheme> {
    /// Maximum number of items to store
    sample_size: usize,
    /// Bounded min-heap over the generated keys
    heap: BinaryHeap<Reverse<WeightedItem<T>>>,
    /// Total number of items fed
    stream_size: u64,
    /// Random number generator
    rng: SmallRng,
    scheme: PhantomData<S>,
}

impl<T, S: OrderScheme> OrderSampler<T, S> {
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
        Ok(OrderSampler {
            sample_size,
            heap: BinaryHeap::with_capacity(sample_size),
            stream_size: 0,
            rng,
            scheme: PhantomData,
        })
    }

    /// Feeds one item with the scheme's default weight.
    ///
    /// # Errors
    ///
    /// Returns `StreamOverflow` once the stream counter saturates.
    pub fn feed(&mut self, item: T) -> Result<bool> {
        self.feed_weighted(item, S::DEFAULT_WEIGHT)
    }

    /// Feeds one weighted item, returning whether the sample changed.
    ///
    /// # Errors
    ///
    /// Returns `IllegalWeight` when the weight is outside the scheme's
    /// range (NaN and non-finite weights always are), and `StreamOverflow`
    /// once the stream counter saturates.
    pub fn feed_weighted(&mut self, item: T, weight: f64) -> Result<bool> {
        if !S::is_weight_valid(weight) {
            return Err(SampleError::IllegalWeight {
                weight,
                range: S::WEIGHT_RANGE,
            });
        }
        if self.stream_size == u64::MAX {
            return Err(SampleError::StreamOverflow);
        }
        self.stream_size += 1;

        let key = S::key(weight, &mut self.rng);
        // Extreme in-range weights can push a quotient key to infinity;
        // the key order only needs a finite ceiling.
        let key = if key.is_finite() { key } else { f64::MAX };
        let entry = WeightedItem::new(item, key);

        if self.heap.len() < self.sample_size {
            self.heap.push(Reverse(entry));
            return Ok(true);
        }
        let replaces = match self.heap.peek() {
            Some(Reverse(root)) => entry > *root,
            None => true,
        };
        if replaces {
            self.heap.pop();
            self.heap.push(Reverse(entry));
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Feeds every item of a sequence with the default weight.
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

    /// Returns the current sample in the heap's iteration order.
    pub fn sample(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|entry| entry.0.item())
    }

    /// Returns the current sample with each item's generated key.
    pub fn sample_keys(&self) -> impl Iterator<Item = &WeightedItem<T>> {
        self.heap.iter().map(|entry| &entry.0)
    }

    /// Returns the current sample as an owned vector.
    pub fn into_sample(self) -> Vec<T> {
        self.heap
            .into_iter()
            .map(|entry| entry.0.into_item())
            .collect()
    }

    /// Returns the configured sample size `k`.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Returns the number of items fed since construction.
    pub fn stream_size(&self) -> u64 {
        self.stream_size
    }

    /// Returns the number of items currently retained.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no items have been fed yet.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
