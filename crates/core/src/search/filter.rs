//! Recipe filtering engine for search queries.
//!
//! Filters run on the fully ranked corpus, before truncation to `top_k`, in a
//! fixed order: diet, cuisine, cooking time. They compose by intersection and
//! never reorder the ranking. A filter that removes every recipe yields an
//! empty result, not an error.

use crate::config::CUISINE_PASSTHROUGH;
use serde::{Deserialize, Serialize};

/// Caller-supplied structured filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeFilters {
    /// Keep recipes whose tag blob contains any of these tags. Empty = no-op.
    #[serde(default)]
    pub diet: Vec<String>,
    /// Keep recipes whose tag blob contains this cuisine. `None` or a
    /// pass-through sentinel (`"all"`, `"any"`, ...) = no-op.
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Keep recipes cooked within this many minutes. `None` or 0 = no-op.
    #[serde(default)]
    pub max_minutes: Option<u32>,
}

impl RecipeFilters {
    /// Lowercases and resolves sentinels once per query.
    pub fn prepare(&self) -> PreparedFilters {
        let diet: Vec<String> = self
            .diet
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let cuisine = self
            .cuisine
            .as_deref()
            .map(normalize_selection)
            .filter(|c| !is_passthrough_cuisine(c));
        let max_minutes = self.max_minutes.filter(|&m| m > 0);

        PreparedFilters {
            diet,
            cuisine,
            max_minutes,
        }
    }
}

/// Filters ready to be evaluated against many recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedFilters {
    diet: Vec<String>,
    cuisine: Option<String>,
    max_minutes: Option<u32>,
}

impl PreparedFilters {
    /// `true` if no filter is active.
    pub fn is_pass_through(&self) -> bool {
        self.diet.is_empty() && self.cuisine.is_none() && self.max_minutes.is_none()
    }

    /// Evaluates diet, cuisine, then time. `tags_lowercase` must already be lowercased.
    pub fn matches(&self, tags_lowercase: &str, minutes: u32) -> bool {
        matches_diet(tags_lowercase, &self.diet)
            && matches_cuisine(tags_lowercase, self.cuisine.as_deref())
            && matches_time(minutes, self.max_minutes)
    }
}

/// `true` if `tags` contains any of `allowed` (all lowercase), or `allowed` is empty.
pub fn matches_diet(tags: &str, allowed: &[String]) -> bool {
    allowed.is_empty() || allowed.iter().any(|t| tags.contains(t.as_str()))
}

/// `true` if `tags` contains `cuisine` (lowercase), or no cuisine is requested.
pub fn matches_cuisine(tags: &str, cuisine: Option<&str>) -> bool {
    match cuisine {
        Some(c) => tags.contains(c),
        None => true,
    }
}

/// `true` if `minutes <= max`, or no positive ceiling is set.
pub fn matches_time(minutes: u32, max_minutes: Option<u32>) -> bool {
    match max_minutes {
        Some(max) if max > 0 => minutes <= max,
        _ => true,
    }
}

/// `true` for selections meaning "every cuisine". Expects [`normalize_selection`] output.
pub fn is_passthrough_cuisine(normalized: &str) -> bool {
    CUISINE_PASSTHROUGH.contains(&normalized)
}

/// Trim, lowercase, and collapse inner whitespace.
fn normalize_selection(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
