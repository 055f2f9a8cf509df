//! Vitter's Algorithm X skip-count generator
//!
//! Algorithm X inverts the skip distribution directly: one uniform draw
//! decides the entire gap. The running product `quot` equals the
//! probability of skipping at least the current number of items, so the
//! first position where `quot <= r` is the correctly distributed skip.

use rand::RngCore;

use crate::common::random::random_open01;
use crate::common::{Result, SampleError};
use crate::skip::SkipGenerator;

/// Skip-count generator for Algorithm X.
///
/// One uniform draw per skip instead of one per item; the per-call cost is
/// still linear in the skip length because `quot` is updated item by item.
#[derive(Clone, Debug)]
pub struct VitterXSkip {
    sample_size: u64,
    stream_size: u64,
}

impl SkipGenerator for VitterXSkip {
    fn for_sample_size(sample_size: u64) -> Self {
        VitterXSkip {
            sample_size,
            stream_size: sample_size,
        }
    }

    fn next_skip(&mut self, rng: &mut dyn RngCore) -> Result<u64> {
        let k = self.sample_size as f64;
        let r = random_open01(rng);
        let mut quot = 1.0f64;
        let mut skip = 0u64;
        loop {
            self.stream_size = self
                .stream_size
                .checked_add(1)
                .ok_or(SampleError::StreamOverflow)?;
            let t = self.stream_size as f64;
            quot *= (t - k) / t;
            if quot <= r {
                return Ok(skip);
            }
            skip += 1;
        }
    }
}
