//! Deterministic ranking of dense score vectors.
//!
//! Every ranking in the crate orders by score descending and breaks ties by
//! ascending ordinal, so identical inputs always produce identical output.
//! Non-finite scores are ranked as 0.0.

use crate::search::types::RankedResult;
use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

fn finite_or_zero(score: f32) -> f32 {
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

/// Score descending, then ordinal ascending.
pub fn compare_ranked(a: &(u32, f32), b: &(u32, f32)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

/// Orders every entry of `scores`.
pub fn rank_all(scores: &[f32]) -> RankedResult {
    let mut ranked: RankedResult = scores
        .iter()
        .enumerate()
        .map(|(ordinal, &s)| (ordinal as u32, finite_or_zero(s)))
        .collect();
    ranked.sort_unstable_by(compare_ranked);
    ranked
}

/// Returns the best `min(k, scores.len())` entries in ranking order.
pub fn top_k(scores: &[f32], k: usize) -> RankedResult {
    if k == 0 {
        return Vec::new();
    }
    if k >= scores.len() {
        return rank_all(scores);
    }

    // Partial sort: O(n log k) via min-heap of size k. The key orders better
    // entries higher: larger score, then smaller ordinal.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, Reverse<u32>)>> =
        BinaryHeap::with_capacity(k + 1);
    for (ordinal, &s) in scores.iter().enumerate() {
        heap.push(Reverse((
            OrderedFloat(finite_or_zero(s)),
            Reverse(ordinal as u32),
        )));
        if heap.len() > k {
            heap.pop();
        }
    }
    let mut ranked: RankedResult = heap
        .into_iter()
        .map(|Reverse((s, Reverse(ordinal)))| (ordinal, s.0))
        .collect();
    ranked.sort_unstable_by(compare_ranked);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_all_ties_by_ordinal() {
        let ranked = rank_all(&[0.5, 0.9, 0.5, 0.0, 0.9]);
        let ordinals: Vec<u32> = ranked.iter().map(|&(o, _)| o).collect();
        assert_eq!(ordinals, vec![1, 4, 0, 2, 3]);
    }

    #[test]
    fn test_top_k_matches_rank_all_prefix() {
        let scores = [0.3, 0.7, 0.7, 0.1, 0.9, 0.3, 0.0, 0.7];
        let full = rank_all(&scores);
        for k in 0..=scores.len() + 2 {
            let partial = top_k(&scores, k);
            assert_eq!(partial.len(), k.min(scores.len()));
            assert_eq!(partial[..], full[..partial.len()], "k={k}");
        }
    }

    #[test]
    fn test_non_finite_scores_rank_as_zero() {
        let ranked = rank_all(&[f32::NAN, 0.2, f32::INFINITY]);
        assert_eq!(ranked, vec![(1, 0.2), (0, 0.0), (2, 0.0)]);
    }

    #[test]
    fn test_negative_scores_rank_below_zero() {
        let ranked = top_k(&[-0.4, 0.0, 1.2], 2);
        assert_eq!(ranked, vec![(2, 1.2), (1, 0.0)]);
    }

    #[test]
    fn test_empty_scores() {
        assert!(rank_all(&[]).is_empty());
        assert!(top_k(&[], 5).is_empty());
    }
}
