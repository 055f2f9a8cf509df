//! Lock-free reservoir sampling with Li's Algorithm L
//!
//! A multi-producer variant of the unweighted engine. The reservoir is a
//! fixed array of epoch-managed atomic slots, the fill level, stream
//! counter, and pending skip are atomic integers, and the generator's `W`
//! lives in an atomic bit pattern of its `f64` value. Algorithm L is the
//! only variant whose generator state is a single scalar between skips,
//! which is what makes the compare-and-set protocol sound; the other
//! generators have no thread-safe form.
//!
//! Producers contend only on small CAS loops; replaced items are retired
//! through epoch-based reclamation so readers never observe a freed slot.
#![allow(unsafe_code)]

use std::cell::RefCell;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Relaxed, Release};
use std::sync::atomic::{AtomicU64, AtomicUsize};

use crossbeam::epoch::{self, Atomic, Owned, Shared};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::common::random::random_open01;
use crate::common::validation::validate_sample_size;
use crate::common::{Result, SampleError};
use crate::skip::li_l::li_l_step;

thread_local! {
    static FEED_RNG: RefCell<Xoshiro256StarStar> =
        RefCell::new(Xoshiro256StarStar::from_os_rng());
}

fn with_feed_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut Xoshiro256StarStar) -> R,
{
    FEED_RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Thread-safe uniform reservoir sampling with Li's Algorithm L.
///
/// Multiple producers may call [`feed`](ConcurrentLiLSampler::feed)
/// concurrently; each call is linearizable with respect to other feeds and
/// to [`sample`](ConcurrentLiLSampler::sample) reads. Items are considered
/// in the order of their stream-counter increments, which preserves the
/// k/n inclusion guarantee under that order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reservoir_oxide::ConcurrentLiLSampler;
///
/// let sampler = Arc::new(ConcurrentLiLSampler::new(10).unwrap());
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let sampler = Arc::clone(&sampler);
///         std::thread::spawn(move || {
///             for i in 0..250 {
///                 sampler.feed(t * 250 + i).unwrap();
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(sampler.stream_size(), 1000);
/// assert_eq!(sampler.sample().len(), 10);
/// ```
pub struct ConcurrentLiLSampler<T> {
    /// Maximum number of items to store
    sample_size: usize,
    /// Epoch-managed reservoir slots
    slots: Box<[Atomic<T>]>,
    /// Number of slots claimed during the fill phase
    fill: AtomicUsize,
    /// Total number of items fed
    stream_size: AtomicU64,
    /// Items still to ignore before the next acceptance
    skip: AtomicU64,
    /// Bit pattern of the generator's `W`
    w_bits: AtomicU64,
}

impl<T> ConcurrentLiLSampler<T> {
    /// Creates a sampler holding up to `sample_size` items.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `sample_size` is 0.
    pub fn new(sample_size: usize) -> Result<Self> {
        validate_sample_size(sample_size)?;
        let mut rng = SmallRng::from_os_rng();
        let k = sample_size as f64;
        let w = random_open01(&mut rng).powf(1.0 / k);
        let r1 = random_open01(&mut rng);
        let r2 = random_open01(&mut rng);
        // The first gap applies as soon as the reservoir fills.
        let (skip, w) = li_l_step(k, w, r1, r2)?;

        let mut slots = Vec::with_capacity(sample_size);
        for _ in 0..sample_size {
            slots.push(Atomic::null());
        }
        Ok(ConcurrentLiLSampler {
            sample_size,
            slots: slots.into_boxed_slice(),
            fill: AtomicUsize::new(0),
            stream_size: AtomicU64::new(0),
            skip: AtomicU64::new(skip),
            w_bits: AtomicU64::new(w.to_bits()),
        })
    }

    /// Feeds one item, returning whether the sample changed.
    ///
    /// # Errors
    ///
    /// Returns `StreamOverflow` once the stream counter saturates; the
    /// sampler is unusable afterwards.
    pub fn feed(&self, item: T) -> Result<bool> {
        self.stream_size
            .fetch_update(AcqRel, Acquire, |count| count.checked_add(1))
            .map_err(|_| SampleError::StreamOverflow)?;

        let guard = epoch::pin();
        let mut new = Owned::new(item);

        // Fill phase: claim the slot at the current fill level.
        loop {
            let fill = self.fill.load(Acquire);
            if fill >= self.sample_size {
                break;
            }
            match self.slots[fill].compare_exchange(
                Shared::null(),
                new,
                AcqRel,
                Acquire,
                &guard,
            ) {
                Ok(_) => {
                    self.fill.fetch_add(1, Release);
                    return Ok(true);
                }
                // A racer claimed the slot first; take the item back and
                // re-read the fill level.
                Err(race) => new = race.new,
            }
        }

        // Replacement phase: burn one unit of the pending skip, or draw
        // the next gap and overwrite a uniform slot.
        loop {
            let skip = self.skip.load(Acquire);
            if skip > 0 {
                if self
                    .skip
                    .compare_exchange(skip, skip - 1, AcqRel, Acquire)
                    .is_ok()
                {
                    return Ok(false);
                }
            } else {
                let next = self.next_skip()?;
                if self.skip.compare_exchange(0, next, AcqRel, Acquire).is_ok() {
                    let slot = with_feed_rng(|rng| rng.random_range(0..self.sample_size));
                    let old = self.slots[slot].swap(new, AcqRel, &guard);
                    if !old.is_null() {
                        // SAFETY: `old` was created by `Owned::new` in an
                        // earlier feed and has just been unlinked; readers
                        // from earlier epochs keep it alive until they
                        // unpin.
                        unsafe { guard.defer_destroy(old) };
                    }
                    return Ok(true);
                }
            }
        }
    }

    /// Draws the next gap, serialized through CAS on the atomic `W`.
    fn next_skip(&self) -> Result<u64> {
        let k = self.sample_size as f64;
        loop {
            let bits = self.w_bits.load(Acquire);
            let (r1, r2) = with_feed_rng(|rng| (random_open01(rng), random_open01(rng)));
            let (skip, next_w) = li_l_step(k, f64::from_bits(bits), r1, r2)?;
            if self
                .w_bits
                .compare_exchange(bits, next_w.to_bits(), AcqRel, Acquire)
                .is_ok()
            {
                return Ok(skip);
            }
        }
    }

    /// Returns the current sample.
    ///
    /// Each slot is read at atomic granularity: the value is either the
    /// slot's prior item or one written by a completed feed. The observed
    /// size may lag a concurrent fill by one increment.
    pub fn sample(&self) -> Vec<T>
    where
        T: Clone,
    {
        let guard = epoch::pin();
        let mut items = Vec::with_capacity(self.sample_size);
        for slot in &self.slots {
            let current = slot.load(Acquire, &guard);
            // SAFETY: non-null slot pointers come from `Owned::new` and
            // stay alive for the duration of the pinned epoch.
            if let Some(item) = unsafe { current.as_ref() } {
                items.push(item.clone());
            }
        }
        items
    }

    /// Consumes the sampler and returns the sampled items.
    pub fn into_sample(mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.sample_size);
        // SAFETY: exclusive access; no other thread can reach the slots.
        unsafe {
            let guard = epoch::unprotected();
            for slot in &mut *self.slots {
                let current = slot.swap(Shared::null(), Relaxed, guard);
                if !current.is_null() {
                    items.push(*current.into_owned().into_box());
                }
            }
        }
        items
    }

    /// Returns the configured sample size `k`.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Returns the number of items fed since construction.
    pub fn stream_size(&self) -> u64 {
        self.stream_size.load(Acquire)
    }

    /// Returns the number of items currently in the reservoir.
    pub fn len(&self) -> usize {
        self.fill.load(Acquire).min(self.sample_size)
    }

    /// Returns true if no items have been fed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Drop for ConcurrentLiLSampler<T> {
    fn drop(&mut self) {
        // SAFETY: exclusive access; reclaim whatever the slots still hold.
        unsafe {
            let guard = epoch::unprotected();
            for slot in &*self.slots {
                let current = slot.swap(Shared::null(), Relaxed, guard);
                if !current.is_null() {
                    drop(current.into_owned());
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for ConcurrentLiLSampler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentLiLSampler")
            .field("sample_size", &self.sample_size)
            .field("fill", &self.fill)
            .field("stream_size", &self.stream_size)
            .field("skip", &self.skip)
            .finish()
    }
}
