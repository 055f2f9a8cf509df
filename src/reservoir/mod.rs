//! Unweighted reservoir sampling engines
//!
//! One engine, four skip-count generators:
//!
//! - [`WatermanSampler`]: Algorithm R, the textbook baseline
//! - [`VitterXSampler`]: Algorithm X, one draw per skip
//! - [`VitterZSampler`]: Algorithm Z, expected O(1) draws per acceptance
//! - [`LiLSampler`]: Algorithm L, three draws per acceptance
//! - [`ConcurrentLiLSampler`]: lock-free Algorithm L for multi-producer feeds
//!
//! All variants maintain the same invariant: after any number of fed items
//! every element seen so far is present in the sample with probability
//! k/n.

pub mod concurrent;
pub mod sampler;

pub use concurrent::ConcurrentLiLSampler;
pub use sampler::{
    LiLSampler, ReservoirSampler, VitterXSampler, VitterZSampler, WatermanSampler,
};
