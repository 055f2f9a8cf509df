//! Skip-count generators for the unweighted reservoir engines
//!
//! A skip-count generator answers one question: after an item has been
//! accepted into a full reservoir, how many of the following stream items
//! can be ignored before the next acceptance? Deciding the whole gap at
//! once reduces random-number draws from O(n) to O(k * (1 + log(n/k)))
//! compared with flipping a coin per item.
//!
//! Four generators are provided, in increasing order of sophistication:
//!
//! - [`WatermanSkip`]: Algorithm R (Waterman), one uniform draw per item
//! - [`VitterXSkip`]: Algorithm X (Vitter 1985), one draw per skip
//! - [`VitterZSkip`]: Algorithm Z (Vitter 1985), rejection sampling
//! - [`LiLSkip`]: Algorithm L (Li 1994), closed-form geometric-style skips
//!
//! All generators share the same streaming contract: the first call returns
//! the number of items to ignore immediately after the reservoir fills, and
//! each subsequent call the gap between two acceptances. A generator whose
//! internal state saturates fails with
//! [`StreamOverflow`](crate::SampleError::StreamOverflow).
//!
//! # References
//!
//! - Vitter, J. S. (1985). "Random sampling with a reservoir"
//! - Li, K-H. (1994). "Reservoir-sampling algorithms of time complexity
//!   O(n(1 + log(N/n)))"

use rand::RngCore;

use crate::common::Result;

pub mod li_l;
pub mod vitter_x;
pub mod vitter_z;
pub mod waterman;

pub use li_l::LiLSkip;
pub use vitter_x::VitterXSkip;
pub use vitter_z::VitterZSkip;
pub use waterman::WatermanSkip;

/// Stateful generator of the gaps between accepted stream items.
///
/// The reservoir engine is generic over this trait, which makes
/// [`for_sample_size`](SkipGenerator::for_sample_size) the factory allowing
/// any unweighted variant to drive the same engine. The random source flows
/// in per call so a generator itself carries only its numeric state.
pub trait SkipGenerator {
    /// Builds a generator for reservoirs holding `sample_size` items.
    ///
    /// `sample_size` must be positive; the engines validate this before
    /// constructing their generator.
    fn for_sample_size(sample_size: u64) -> Self
    where
        Self: Sized;

    /// Returns the next non-negative skip count, advancing internal state.
    ///
    /// # Errors
    ///
    /// Returns [`StreamOverflow`](crate::SampleError::StreamOverflow) when
    /// the generator's stream position or numeric state saturates. The
    /// generator is unusable afterwards.
    fn next_skip(&mut self, rng: &mut dyn RngCore) -> Result<u64>;
}
