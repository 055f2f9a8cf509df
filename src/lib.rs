//! reservoir_oxide: Reservoir Sampling Algorithms for Data Streams
//!
//! Single-pass algorithms that maintain a bounded random sample of k items
//! from a stream of unknown or unbounded length, in O(k) memory. Both
//! equal-probability and weight-biased sampling are covered:
//!
//! | Engine | Bias | Cost per item |
//! |--------|------|---------------|
//! | [`WatermanSampler`] | uniform | O(1), one draw per item |
//! | [`VitterXSampler`] | uniform | O(1), one draw per acceptance |
//! | [`VitterZSampler`] | uniform | O(1), expected O(1) draws per acceptance |
//! | [`LiLSampler`] | uniform | O(1), three draws per acceptance |
//! | [`ConcurrentLiLSampler`] | uniform, multi-producer | lock-free CAS |
//! | [`EfraimidisSampler`] | weight-biased (order sampling) | O(log k) |
//! | [`SequentialPoissonSampler`] | weight-biased (order sampling) | O(log k) |
//! | [`ParetoSampler`] | weight-biased (order sampling) | O(log k) |
//! | [`ChaoSampler`] | strictly proportional | O(k) |
//!
//! Every engine shares the same streaming surface: `feed` items in,
//! read the live `sample` at any time, and inspect `sample_size` and
//! `stream_size`.
//!
//! ```
//! use reservoir_oxide::VitterZSampler;
//!
//! let mut sampler: VitterZSampler<u64> = VitterZSampler::new(10).unwrap();
//! for item in 0..100_000 {
//!     sampler.feed(item).unwrap();
//! }
//! assert_eq!(sampler.sample().len(), 10);
//! assert_eq!(sampler.stream_size(), 100_000);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collector;
pub mod common;
pub mod reservoir;
pub mod skip;
pub mod weighted;

// Re-export core types for convenience
pub use collector::StreamCollector;
pub use common::{Result, SampleError};
pub use reservoir::{
    ConcurrentLiLSampler, LiLSampler, ReservoirSampler, VitterXSampler, VitterZSampler,
    WatermanSampler,
};
pub use skip::{LiLSkip, SkipGenerator, VitterXSkip, VitterZSkip, WatermanSkip};
pub use weighted::{
    ARes, ChaoSampler, EfraimidisSampler, OrderSampler, OrderScheme, Pareto, ParetoSampler,
    SequentialPoisson, SequentialPoissonSampler, WeightedItem,
};

/// Error types and result aliases for sampler operations
pub mod error {
    pub use crate::common::{Result, SampleError};
}
