//! Scored document types for search results.

use crate::document::Recipe;
use std::sync::Arc;

/// Dense per-query scores, indexed by document ordinal.
pub type ScoreVector = Vec<f32>;

/// `(ordinal, score)` pairs sorted by descending score, ties by ascending ordinal.
pub type RankedResult = Vec<(u32, f32)>;

/// A recipe with its fused relevance score.
///
/// `score` is finite and lies in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    /// Ordinal of the recipe in the corpus.
    pub ordinal: u32,
    /// The matched recipe (shared reference).
    pub recipe: Arc<Recipe>,
    /// Fused relevance score.
    pub score: f32,
}
