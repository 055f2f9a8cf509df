//! Waterman's Algorithm R expressed as a skip-count generator
//!
//! The classic per-item formulation draws one uniform per stream item and
//! accepts item t with probability k/t. Folding the per-item coin flips
//! into a skip counter keeps the draw count identical but lets every
//! unweighted variant share one engine.

use rand::{Rng, RngCore};

use crate::common::{Result, SampleError};
use crate::skip::SkipGenerator;

/// Skip-count generator for Algorithm R.
///
/// State is the running stream size `t`, initialized to the sample size.
/// Each call increments `t` and draws one uniform `u` per candidate item,
/// skipping while `u * t >= k`.
#[derive(Clone, Debug)]
pub struct WatermanSkip {
    sample_size: u64,
    stream_size: u64,
}

impl SkipGenerator for WatermanSkip {
    fn for_sample_size(sample_size: u64) -> Self {
        WatermanSkip {
            sample_size,
            stream_size: sample_size,
        }
    }

    fn next_skip(&mut self, rng: &mut dyn RngCore) -> Result<u64> {
        let k = self.sample_size as f64;
        let mut skip = 0u64;
        loop {
            self.stream_size = self
                .stream_size
                .checked_add(1)
                .ok_or(SampleError::StreamOverflow)?;
            let u: f64 = rng.random();
            if u * (self.stream_size as f64) < k {
                return Ok(skip);
            }
            skip += 1;
        }
    }
}
