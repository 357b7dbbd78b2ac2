//! Linear score fusion.
//!
//! Combines the BM25 and TF-IDF score vectors into one ranking:
//! each vector is min-max normalized independently, then
//! `fused(d) = alpha * norm_bm25(d) + (1 - alpha) * norm_tfidf(d)`.
//! Both inputs are dense over the whole corpus; an ordinal an index did not
//! score carries 0.0.

use crate::config::NORMALIZATION_EPSILON;
use crate::search::rank::rank_all;
use crate::search::types::RankedResult;

/// Rescales `scores` in place to `[0, 1]` via `(s - min) / (max - min + eps)`.
///
/// Non-finite inputs are treated as 0.0. When every score ties the result is
/// all zeros.
pub fn min_max_normalize(scores: &mut [f32]) {
    for s in scores.iter_mut() {
        if !s.is_finite() {
            *s = 0.0;
        }
    }
    let Some((min, max)) = min_max(scores) else {
        return;
    };
    let denom = max - min + NORMALIZATION_EPSILON;
    for s in scores.iter_mut() {
        let norm = (*s - min) / denom;
        *s = if norm.is_finite() { norm } else { 0.0 };
    }
}

/// Normalizes both vectors and ranks every ordinal by fused score.
///
/// `alpha` is clamped to `[0, 1]`. A shorter input is padded with zeros so
/// every ordinal in `0..max(len)` appears exactly once in the output.
pub fn linear_fusion(probabilistic: &[f32], lexical: &[f32], alpha: f32) -> RankedResult {
    let alpha = if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        crate::config::DEFAULT_ALPHA
    };
    let n = probabilistic.len().max(lexical.len());

    let mut prob = probabilistic.to_vec();
    prob.resize(n, 0.0);
    let mut lex = lexical.to_vec();
    lex.resize(n, 0.0);
    min_max_normalize(&mut prob);
    min_max_normalize(&mut lex);

    let fused: Vec<f32> = prob
        .iter()
        .zip(lex.iter())
        .map(|(&p, &l)| {
            let score = alpha * p + (1.0 - alpha) * l;
            if score.is_finite() {
                score.clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect();

    rank_all(&fused)
}

/// Single-pass min/max computation.
fn min_max(scores: &[f32]) -> Option<(f32, f32)> {
    if scores.is_empty() {
        return None;
    }
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &s in scores {
        if s < min {
            min = s;
        }
        if s > max {
            max = s;
        }
    }
    Some((min, max))
}
