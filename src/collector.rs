//! Collector adapter: fold a stream into a sampler
//!
//! A thin convenience layer for driving any engine from a fold-shaped
//! pipeline: create the empty sampler, fold items in one at a time,
//! extract the sample at the end. The reduction is unordered (feeding
//! order does not bias the sample) and non-combinable: merging two partial
//! samplers is not a meaningful operation, so
//! [`combine`](StreamCollector::combine) always fails.

use crate::common::{Result, SampleError};
use crate::reservoir::{ConcurrentLiLSampler, ReservoirSampler};
use crate::skip::SkipGenerator;
use crate::weighted::{ChaoSampler, OrderSampler, OrderScheme};

/// A sampler usable as the accumulator of a fold.
///
/// # Examples
///
/// ```
/// use reservoir_oxide::{StreamCollector, WatermanSampler};
///
/// let mut sampler: WatermanSampler<u32> = StreamCollector::empty(10).unwrap();
/// for i in 0..1000 {
///     sampler.fold(i).unwrap();
/// }
/// let sample = sampler.finish();
/// assert_eq!(sample.len(), 10);
/// ```
pub trait StreamCollector: Sized {
    /// The element type folded into the sampler.
    type Item;

    /// Creates the empty sampler the reduction folds into.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `sample_size` is 0.
    fn empty(sample_size: usize) -> Result<Self>;

    /// Folds one item into the sampler; weighted engines use their default
    /// weight.
    ///
    /// # Errors
    ///
    /// As the engine's `feed`.
    fn fold(&mut self, item: Self::Item) -> Result<bool>;

    /// Extracts the sampled items.
    fn finish(self) -> Vec<Self::Item>;

    /// Combining partial samplers is not meaningful and always fails.
    ///
    /// # Errors
    ///
    /// Always returns `IncompatibleSamplers`.
    fn combine(self, _other: Self) -> Result<Self> {
        Err(SampleError::IncompatibleSamplers {
            reason: "reservoir samplers are single-stream reductions and cannot be combined"
                .to_string(),
        })
    }
}

impl<T, G: SkipGenerator> StreamCollector for ReservoirSampler<T, G> {
    type Item = T;

    fn empty(sample_size: usize) -> Result<Self> {
        Self::new(sample_size)
    }

    fn fold(&mut self, item: T) -> Result<bool> {
        self.feed(item)
    }

    fn finish(self) -> Vec<T> {
        self.into_sample()
    }
}

impl<T, S: OrderScheme> StreamCollector for OrderSampler<T, S> {
    type Item = T;

    fn empty(sample_size: usize) -> Result<Self> {
        Self::new(sample_size)
    }

    fn fold(&mut self, item: T) -> Result<bool> {
        self.feed(item)
    }

    fn finish(self) -> Vec<T> {
        self.into_sample()
    }
}

impl<T> StreamCollector for ChaoSampler<T> {
    type Item = T;

    fn empty(sample_size: usize) -> Result<Self> {
        Self::new(sample_size)
    }

    fn fold(&mut self, item: T) -> Result<bool> {
        self.feed(item)
    }

    fn finish(self) -> Vec<T> {
        self.into_sample()
    }
}

impl<T> StreamCollector for ConcurrentLiLSampler<T> {
    type Item = T;

    fn empty(sample_size: usize) -> Result<Self> {
        Self::new(sample_size)
    }

    fn fold(&mut self, item: T) -> Result<bool> {
        self.feed(item)
    }

    fn finish(self) -> Vec<T> {
        self.into_sample()
    }
}
