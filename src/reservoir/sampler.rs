//! The unweighted reservoir engine
//!
//! Holds the k-element reservoir, drives a skip-count generator, and
//! accepts or discards each incoming element. The engine is generic over
//! [`SkipGenerator`], so all unweighted variants share the fill, skip, and
//! replacement logic and differ only in how the gaps are drawn.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::validation::validate_sample_size;
use crate::common::{Result, SampleError};
use crate::skip::{LiLSkip, SkipGenerator, VitterXSkip, VitterZSkip, WatermanSkip};

/// Uniform reservoir sampling over a stream of unknown length.
///
/// Every element fed so far is in the sample with probability
/// `min(1, k/n)`. The sample is a live view: it reflects the engine's
/// current state at every read.
///
/// # Examples
///
/// ```
/// use reservoir_oxide::WatermanSampler;
///
/// let mut sampler: WatermanSampler<u32> = WatermanSampler::new(10).unwrap();
/// for i in 0..1000 {
///     sampler.feed(i).unwrap();
/// }
///
/// assert_eq!(sampler.sample().len(), 10);
/// assert_eq!(sampler.stream_size(), 1000);
/// ```
#[derive(Clone, Debug)]
pub struct ReservoirSampler<T, G: SkipGenerator> {
    /// Maximum number of items to store
    sample_size: usize,
    /// The reservoir of sampled items
    reservoir: Vec<T>,
    /// Total number of items fed
    stream_size: u64,
    /// Items still to ignore before the next acceptance
    skip: u64,
    /// Variant-specific gap generator
    generator: G,
    /// Random number generator
    rng: SmallRng,
}

/// Reservoir sampling with Waterman's Algorithm R.
pub type WatermanSampler<T> = ReservoirSampler<T, WatermanSkip>;

/// Reservoir sampling with Vitter's Algorithm X.
pub type VitterXSampler<T> = ReservoirSampler<T, VitterXSkip>;

/// Reservoir sampling with Vitter's Algorithm Z.
pub type VitterZSampler<T> = ReservoirSampler<T, VitterZSkip>;

/// Reservoir sampling with Li's Algorithm L.
pub type LiLSampler<T> = ReservoirSampler<T, LiLSkip>;

impl<T, G: SkipGenerator> ReservoirSampler<T, G> {
    /// Creates a sampler holding up to `sample_size` items.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `sample_size` is 0.
    pub fn new(sample_size: usize) -> Result<Self> {
        Self::with_rng(sample_size, SmallRng::from_os_rng())
    }

    /// Creates a sampler with a seed for reproducibility.
    ///
    /// # Examples
    ///
    /// ```
    /// use reservoir_oxide::LiLSampler;
    ///
    /// let mut s1: LiLSampler<i32> = LiLSampler::with_seed(10, 42).unwrap();
    /// let mut s2: LiLSampler<i32> = LiLSampler::with_seed(10, 42).unwrap();
    /// for i in 0..100 {
    ///     s1.feed(i).unwrap();
    ///     s2.feed(i).unwrap();
    /// }
    /// assert_eq!(s1.sample(), s2.sample());
    /// ```
    pub fn with_seed(sample_size: usize, seed: u64) -> Result<Self> {
        Self::with_rng(sample_size, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(sample_size: usize, mut rng: SmallRng) -> Result<Self> {
        validate_sample_size(sample_size)?;
        let mut generator = G::for_sample_size(sample_size as u64);
        // The first gap applies as soon as the reservoir fills.
        let skip = generator.next_skip(&mut rng)?;
        Ok(ReservoirSampler {
            sample_size,
            reservoir: Vec::with_capacity(sample_size),
            stream_size: 0,
            skip,
            generator,
            rng,
        })
    }

    /// Feeds one item, returning whether the sample changed.
    ///
    /// # Errors
    ///
    /// Returns `StreamOverflow` once the stream counter saturates; the
    /// sampler is unusable afterwards.
    pub fn feed(&mut self, item: T) -> Result<bool> {
        if self.stream_size == u64::MAX {
            return Err(SampleError::StreamOverflow);
        }
        self.stream_size += 1;

        if self.reservoir.len() < self.sample_size {
            self.reservoir.push(item);
            return Ok(true);
        }
        if self.skip > 0 {
            self.skip -= 1;
            return Ok(false);
        }
        let slot = self.rng.random_range(0..self.sample_size);
        self.reservoir[slot] = item;
        self.skip = self.generator.next_skip(&mut self.rng)?;
        Ok(true)
    }

    /// Feeds every item of a sequence, returning whether any feed changed
    /// the sample.
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

    /// Returns the current sample as a read-only live view.
    pub fn sample(&self) -> &[T] {
        &self.reservoir
    }

    /// Returns the current sample as an owned vector.
    pub fn into_sample(self) -> Vec<T> {
        self.reservoir
    }

    /// Returns the configured sample size `k`.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Returns the number of items fed since construction.
    pub fn stream_size(&self) -> u64 {
        self.stream_size
    }

    /// Returns the number of items currently in the reservoir.
    pub fn len(&self) -> usize {
        self.reservoir.len()
    }

    /// Returns true if no items have been fed yet.
    pub fn is_empty(&self) -> bool {
        self.reservoir.is_empty()
    }
}
