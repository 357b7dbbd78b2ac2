//! Core document types for pantry.
//!
//! A [`Recipe`] holds the presentation attributes that pass through the
//! engine untouched. A [`Document`] pairs a recipe with its ordinal and the
//! two precomputed index inputs: the weighted lexical text blob (TF-IDF) and
//! the normalized token sequence (BM25).

use serde::{Deserialize, Serialize};

/// Presentation attributes of one recipe.
///
/// The engine reads only `tags` and `minutes` (for filtering); everything
/// else is returned to the caller as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// External identifier from the source dataset.
    pub id: u64,
    /// Recipe title.
    pub name: String,
    /// Total cooking time in minutes.
    pub minutes: u32,
    /// Free-form tag blob, matched by the diet and cuisine filters.
    pub tags: String,
    /// Free-text description.
    pub description: String,
    /// Ingredient list as written in the source.
    pub ingredients: Vec<String>,
    /// Preparation steps as written in the source.
    pub steps: Vec<String>,
}

/// A recipe positioned in the corpus, ready for indexing.
///
/// `ordinal` is the document's position in the corpus (0..N-1). Both indices
/// and the ranker's document table use the same ordinal space.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Position in the corpus.
    pub ordinal: u32,
    /// Presentation attributes.
    pub recipe: Recipe,
    /// Weighted, normalized text consumed by the TF-IDF index.
    pub lexical_text: String,
    /// Normalized tokens consumed by the BM25 index.
    pub tokens: Vec<String>,
}

impl Document {
    /// Creates a document from already-normalized index inputs.
    pub fn new(ordinal: u32, recipe: Recipe, lexical_text: String, tokens: Vec<String>) -> Self {
        Self {
            ordinal,
            recipe,
            lexical_text,
            tokens,
        }
    }
}

/// Which token fields feed the BM25 index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bm25Source {
    /// Ingredient tokens only.
    #[default]
    Ingredients,
    /// Title, ingredient, and step tokens.
    All,
}

impl Bm25Source {
    /// Lowercase name used in logs and the stats endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bm25Source::Ingredients => "ingredients",
            Bm25Source::All => "all",
        }
    }
}

impl std::str::FromStr for Bm25Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ingredients" => Ok(Bm25Source::Ingredients),
            "all" => Ok(Bm25Source::All),
            other => Err(format!(
                "unknown BM25 source '{other}' (expected 'ingredients' or 'all')"
            )),
        }
    }
}
