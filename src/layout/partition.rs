//! Balanced contiguous partitioning of an ordered weight sequence.
//!
//! Items keep their document order; the sequence is only split, never
//! reshuffled, so the partition is deterministic for a given input.

use std::ops::Range;

/// Split `weights` into `groups` contiguous index ranges whose sums are as
/// close to equal as single-item granularity allows.
///
/// For each target split point `k * total / groups` a forward scan picks
/// whichever item boundary lies nearest; an exact tie keeps the item in the
/// earlier group. With three groups a lone item lands in the middle group.
///
/// # Panics
/// Panics if `groups` is zero or any weight is not positive.
pub fn partition(weights: &[f32], groups: usize) -> Vec<Range<usize>> {
    assert!(groups >= 1, "cannot partition into zero groups");
    for &weight in weights {
        assert!(weight > 0.0, "item weights must be positive, got {weight}");
    }

    let total: f32 = weights.iter().sum();

    let mut bounds = Vec::with_capacity(groups + 1);
    bounds.push(0usize);
    let mut split = 0usize;
    for k in 1..groups {
        let target = total * k as f32 / groups as f32;
        // Boundaries must never move backwards, float rounding included.
        split = best_split(weights, target).max(split);
        bounds.push(split);
    }
    bounds.push(weights.len());

    bounds.windows(2).map(|pair| pair[0]..pair[1]).collect()
}

/// Index of the item boundary nearest to `target` along the prefix sums.
fn best_split(weights: &[f32], target: f32) -> usize {
    let mut progress = 0.0f32;
    for (i, &weight) in weights.iter().enumerate() {
        if progress + weight >= target {
            return if target - progress < progress + weight - target {
                i
            } else {
                i + 1
            };
        }
        progress += weight;
    }
    weights.len()
}
