//! Chao engine tests
//!
//! Strictly proportional weighted sampling: every item's inclusion
//! probability is min(1, k * w / sum(w)) and the partition invariant
//! |overweight| + |feasible| = min(k, stream size) holds after every feed.

use proptest::prelude::*;
use reservoir_oxide::{ChaoSampler, SampleError};

// ============================================================================
// Phase 1: Construction and validation
// ============================================================================

#[test]
fn test_construction() {
    assert!(ChaoSampler::<i32>::new(5).is_ok());
    assert!(ChaoSampler::<i32>::new(0).is_err());
}

#[test]
fn test_invalid_weights_rejected() {
    let mut sampler: ChaoSampler<i32> = ChaoSampler::with_seed(3, 1).unwrap();
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            sampler.feed_weighted(1, bad),
            Err(SampleError::IllegalWeight { .. })
        ));
    }
    assert_eq!(sampler.stream_size(), 0);
    assert_eq!(sampler.weight_sum(), 0.0);
}

#[test]
fn test_weight_sum_saturation_is_overflow() {
    let mut sampler: ChaoSampler<i32> = ChaoSampler::with_seed(4, 1).unwrap();
    sampler.feed_weighted(1, f64::MAX).unwrap();
    assert_eq!(
        sampler.feed_weighted(2, f64::MAX),
        Err(SampleError::StreamOverflow)
    );
}

#[test]
fn test_extreme_weights_during_fill_do_not_error() {
    let mut sampler: ChaoSampler<u32> = ChaoSampler::with_seed(4, 2).unwrap();
    sampler.feed_weighted(0, f64::MIN_POSITIVE).unwrap();
    sampler.feed_weighted(1, 1e-100).unwrap();
    sampler.feed_weighted(2, 1e100).unwrap();
    sampler.feed_weighted(3, 1.0).unwrap();
    assert_eq!(sampler.len(), 4);
}

// ============================================================================
// Phase 2: Partition invariant
// ============================================================================

#[test]
fn test_partition_sizes_track_min_k_n() {
    let mut sampler: ChaoSampler<u32> = ChaoSampler::with_seed(8, 3).unwrap();
    for i in 0..1_000 {
        sampler.feed_weighted(i, ((i % 23) + 1) as f64).unwrap();
        let expected = 8.min(i as usize + 1);
        assert_eq!(sampler.sample().count(), expected);
    }
    assert_eq!(sampler.stream_size(), 1_000);
}

#[test]
fn test_short_stream_is_kept_whole() {
    let mut sampler: ChaoSampler<u32> = ChaoSampler::with_seed(32, 4).unwrap();
    for i in 0..12 {
        sampler.feed_weighted(i, (i + 1) as f64).unwrap();
    }
    let mut sample: Vec<u32> = sampler.sample().copied().collect();
    sample.sort_unstable();
    let expected: Vec<u32> = (0..12).collect();
    assert_eq!(sample, expected);
}

#[test]
fn test_sample_size_one() {
    let mut sampler: ChaoSampler<u32> = ChaoSampler::with_seed(1, 5).unwrap();
    for i in 0..200 {
        sampler.feed_weighted(i, ((i % 5) + 1) as f64).unwrap();
    }
    assert_eq!(sampler.sample().count(), 1);
}

#[test]
fn test_unweighted_feed_uses_weight_one() {
    let mut sampler: ChaoSampler<u32> = ChaoSampler::with_seed(5, 6).unwrap();
    sampler.feed_iter(0..100).unwrap();
    assert_eq!(sampler.stream_size(), 100);
    assert_eq!(sampler.weight_sum(), 100.0);
    assert_eq!(sampler.sample().count(), 5);
}

// ============================================================================
// Phase 3: Paired-sequence feeding
// ============================================================================

#[test]
fn test_mismatched_lengths_leave_prior_state_visible() {
    let mut sampler: ChaoSampler<u32> = ChaoSampler::with_seed(3, 7).unwrap();
    let err = sampler.feed_zipped(0..10u32, [1.0, 2.0]).unwrap_err();
    assert!(matches!(
        err,
        SampleError::MismatchedLengths { items: 3, weights: 2 }
    ));
    assert_eq!(sampler.stream_size(), 2);
    assert_eq!(sampler.weight_sum(), 3.0);
    assert_eq!(sampler.sample().count(), 2);
}

// ============================================================================
// Phase 4: Strict proportionality
// ============================================================================

#[test]
fn test_inclusion_proportional_to_weight() {
    // Stream 0..10 with weights i+1 and k = 5: element i converges to
    // inclusion frequency k * (i+1) * 2 / (n * (n+1)) = (i+1)/11.
    let k = 5;
    let n = 10u32;
    let trials = 50_000u64;

    let mut counts = vec![0u32; n as usize];
    for seed in 0..trials {
        let mut sampler: ChaoSampler<u32> = ChaoSampler::with_seed(k, seed).unwrap();
        for i in 0..n {
            sampler.feed_weighted(i, (i + 1) as f64).unwrap();
        }
        for &item in &sampler.into_sample() {
            counts[item as usize] += 1;
        }
    }

    for (i, &count) in counts.iter().enumerate() {
        let expected = trials as f64 * (i as f64 + 1.0) / 11.0;
        let ratio = count as f64 / expected;
        assert!(
            (ratio - 1.0).abs() < 0.08,
            "element {}: count {} expected ~{} (ratio {})",
            i,
            count,
            expected,
            ratio
        );
    }
}

#[test]
fn test_dominant_item_is_always_included() {
    let mut always_there = true;
    for seed in 0..200 {
        let mut sampler: ChaoSampler<&str> = ChaoSampler::with_seed(3, seed).unwrap();
        for _ in 0..50 {
            sampler.feed_weighted("noise", 1.0).unwrap();
        }
        sampler.feed_weighted("giant", 1e6).unwrap();
        for _ in 0..50 {
            sampler.feed_weighted("noise", 1.0).unwrap();
        }
        always_there &= sampler.sample().any(|item| *item == "giant");
    }
    assert!(always_there, "an overweight item must be forced into the sample");
}

// ============================================================================
// Phase 5: Property-based tests
// ============================================================================

proptest! {
    #[test]
    fn prop_partition_invariant(
        k in 1usize..16,
        weights in prop::collection::vec(0.1f64..100.0, 0..200),
        seed in 0u64..10_000
    ) {
        let mut sampler: ChaoSampler<usize> = ChaoSampler::with_seed(k, seed).unwrap();
        for (i, &weight) in weights.iter().enumerate() {
            sampler.feed_weighted(i, weight).unwrap();
        }
        prop_assert_eq!(sampler.sample().count(), k.min(weights.len()));
        prop_assert_eq!(sampler.stream_size(), weights.len() as u64);
    }

    #[test]
    fn prop_sample_contains_only_fed_items(
        k in 1usize..8,
        n in 1usize..100,
        seed in 0u64..10_000
    ) {
        let mut sampler: ChaoSampler<usize> = ChaoSampler::with_seed(k, seed).unwrap();
        for i in 0..n {
            sampler.feed_weighted(i, ((i % 9) + 1) as f64).unwrap();
        }
        for &item in &sampler.into_sample() {
            prop_assert!(item < n);
        }
    }
}
