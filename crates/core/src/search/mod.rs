//! Search primitives: score ranking, fusion, recipe filters, and result types.
//!
//! This module provides the building blocks the hybrid ranker composes:
//! deterministic ordering of score vectors, min-max normalization with linear
//! fusion, and the structured post-filters applied to the fused ranking.

/// Recipe filters: diet tags, cuisine, and cooking time ceiling.
pub mod filter;
/// Min-max normalization and linear score fusion.
pub mod hybrid;
/// Deterministic ordering of score vectors (score desc, ordinal asc).
pub mod rank;
/// Scored document and score vector types.
pub mod types;

pub use filter::{PreparedFilters, RecipeFilters};
pub use hybrid::{linear_fusion, min_max_normalize};
pub use rank::{rank_all, top_k};
pub use types::{RankedResult, ScoreVector, ScoredDocument};
