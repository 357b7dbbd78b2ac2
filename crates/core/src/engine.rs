//! Hybrid retrieval engine.
//!
//! A [`HybridRanker`] owns the document table and both indices, all keyed by
//! the same ordinal space. A search scores every document with both indices,
//! fuses the two dense score vectors, applies the filters to the full ranking
//! and only then truncates to `top_k`.

use crate::bm25::{Bm25Params, ProbabilisticIndex};
use crate::config;
use crate::document::{Document, Recipe};
use crate::error::BuildError;
use crate::lexical::LexicalIndex;
use crate::search::filter::RecipeFilters;
use crate::search::hybrid::linear_fusion;
use crate::search::types::{RankedResult, ScoredDocument};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// A recipe plus its pre-lowercased tag blob for filtering.
#[derive(Debug)]
struct RecipeEntry {
    recipe: Arc<Recipe>,
    tags_lowercase: String,
}

/// One search request against a [`HybridRanker`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Raw query string, scored by the TF-IDF index.
    pub text: String,
    /// Normalized query tokens, scored by the BM25 index.
    pub tokens: Vec<String>,
    /// Maximum number of results.
    pub top_k: usize,
    /// Weight of the BM25 score in `[0, 1]`.
    pub alpha: f32,
    pub filters: RecipeFilters,
}

impl SearchQuery {
    /// A query with default `top_k`, `alpha`, and no filters.
    pub fn new(text: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            text: text.into(),
            tokens,
            top_k: config::DEFAULT_TOP_K,
            alpha: config::DEFAULT_ALPHA,
            filters: RecipeFilters::default(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_filters(mut self, filters: RecipeFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Corpus-level statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub documents: u32,
    pub lexical_vocabulary: usize,
    pub probabilistic_vocabulary: usize,
    pub average_token_length: f32,
    pub k1: f32,
    pub b: f32,
    /// `false` once the BM25 source tokens were released.
    pub source_tokens_retained: bool,
}

/// Document table plus the TF-IDF and BM25 indices over it.
#[derive(Debug)]
pub struct HybridRanker {
    documents: Vec<RecipeEntry>,
    lexical: LexicalIndex,
    probabilistic: ProbabilisticIndex,
}

impl HybridRanker {
    /// Builds both indices with default BM25 parameters.
    pub fn build(documents: Vec<Document>) -> Result<Self, BuildError> {
        Self::build_with_params(documents, Bm25Params::default())
    }

    /// Builds both indices. `documents[i].ordinal` must equal `i`.
    pub fn build_with_params(
        documents: Vec<Document>,
        params: Bm25Params,
    ) -> Result<Self, BuildError> {
        if documents.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }
        let start = Instant::now();

        let n = documents.len();
        let mut entries = Vec::with_capacity(n);
        let mut texts = Vec::with_capacity(n);
        let mut tokens = Vec::with_capacity(n);
        for (position, doc) in documents.into_iter().enumerate() {
            if doc.ordinal as usize != position {
                return Err(BuildError::OrdinalMismatch {
                    expected: position as u32,
                    found: doc.ordinal,
                });
            }
            entries.push(RecipeEntry {
                tags_lowercase: doc.recipe.tags.to_lowercase(),
                recipe: Arc::new(doc.recipe),
            });
            texts.push(doc.lexical_text);
            tokens.push(doc.tokens);
        }

        let lexical = LexicalIndex::build(&texts)?;
        let probabilistic = ProbabilisticIndex::build(tokens, params)?;

        tracing::info!(
            documents = n,
            lexical_vocabulary = lexical.vocabulary_size(),
            probabilistic_vocabulary = probabilistic.vocabulary_size(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Hybrid index built"
        );

        Ok(Self {
            documents: entries,
            lexical,
            probabilistic,
        })
    }

    /// Fused ranking of every document, before filtering.
    pub fn rank<S: AsRef<str>>(&self, text: &str, tokens: &[S], alpha: f32) -> RankedResult {
        let probabilistic = self.probabilistic.scores(tokens);
        let lexical = self.lexical.scores(text);
        linear_fusion(&probabilistic, &lexical, alpha)
    }

    /// Ranks, filters diet → cuisine → time, then keeps the first `top_k`.
    pub fn search(&self, query: &SearchQuery) -> Vec<ScoredDocument> {
        if query.top_k == 0 {
            return Vec::new();
        }
        let filters = query.filters.prepare();
        let ranked = self.rank(&query.text, &query.tokens, query.alpha);

        let results: Vec<ScoredDocument> = ranked
            .into_iter()
            .filter(|&(ordinal, _)| {
                let entry = &self.documents[ordinal as usize];
                filters.matches(&entry.tags_lowercase, entry.recipe.minutes)
            })
            .take(query.top_k)
            .map(|(ordinal, score)| ScoredDocument {
                ordinal,
                recipe: Arc::clone(&self.documents[ordinal as usize].recipe),
                score,
            })
            .collect();

        tracing::debug!(
            query = %query.text,
            tokens = query.tokens.len(),
            alpha = query.alpha,
            results = results.len(),
            "Hybrid search"
        );
        results
    }

    /// Drops the BM25 source token lists. Rankings are unaffected.
    pub fn release_source_documents(&mut self) {
        self.probabilistic.release_source_documents();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The recipe at `ordinal`.
    pub fn document(&self, ordinal: u32) -> Option<&Arc<Recipe>> {
        self.documents.get(ordinal as usize).map(|e| &e.recipe)
    }

    pub fn lexical(&self) -> &LexicalIndex {
        &self.lexical
    }

    pub fn probabilistic(&self) -> &ProbabilisticIndex {
        &self.probabilistic
    }

    pub fn stats(&self) -> EngineStats {
        let params = self.probabilistic.params();
        EngineStats {
            documents: self.documents.len() as u32,
            lexical_vocabulary: self.lexical.vocabulary_size(),
            probabilistic_vocabulary: self.probabilistic.vocabulary_size(),
            average_token_length: self.probabilistic.average_doc_length(),
            k1: params.k1,
            b: params.b,
            source_tokens_retained: self.probabilistic.source_documents().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(ordinal: u32, name: &str, tags: &str, minutes: u32, body: &str) -> Document {
        let recipe = Recipe {
            id: ordinal as u64 + 100,
            name: name.to_string(),
            minutes,
            tags: tags.to_string(),
            ..Default::default()
        };
        let tokens = body.split_whitespace().map(str::to_string).collect();
        Document::new(ordinal, recipe, body.to_string(), tokens)
    }

    fn rice_corpus() -> HybridRanker {
        HybridRanker::build(vec![
            doc(0, "Chicken Rice Soup", "['dinner']", 10, "chicken rice soup"),
            doc(1, "Veggie Stir Fry", "['Vegan', 'asian']", 30, "vegetable rice stir fry"),
            doc(2, "Chocolate Cake", "['dessert']", 15, "chocolate cake dessert"),
        ])
        .unwrap()
    }

    fn query(text: &str) -> SearchQuery {
        SearchQuery::new(
            text,
            text.split_whitespace().map(str::to_string).collect(),
        )
    }

    fn ordinals(results: &[ScoredDocument]) -> Vec<u32> {
        results.iter().map(|r| r.ordinal).collect()
    }

    #[test]
    fn test_empty_corpus_rejected() {
        assert_eq!(
            HybridRanker::build(Vec::new()).unwrap_err(),
            BuildError::EmptyCorpus
        );
    }

    #[test]
    fn test_ordinal_mismatch_rejected() {
        let err = HybridRanker::build(vec![doc(0, "a", "", 1, "a"), doc(5, "b", "", 1, "b")])
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::OrdinalMismatch {
                expected: 1,
                found: 5
            }
        );
    }

    #[test]
    fn test_rice_query_ranking() {
        let engine = rice_corpus();
        let results = engine.search(&query("rice").with_top_k(3));
        assert_eq!(ordinals(&results), vec![0, 1, 2]);
        assert!((results[0].score - 1.0).abs() < 1e-4);
        assert_eq!(results[2].score, 0.0);
        assert_eq!(results[0].recipe.name, "Chicken Rice Soup");
    }

    #[test]
    fn test_diet_filter_before_truncation() {
        let engine = rice_corpus();
        let filters = RecipeFilters {
            diet: vec!["vegan".into()],
            ..Default::default()
        };
        let results = engine.search(&query("rice").with_top_k(1).with_filters(filters));
        assert_eq!(ordinals(&results), vec![1]);
    }

    #[test]
    fn test_time_filter() {
        let engine = rice_corpus();
        let filters = RecipeFilters {
            max_minutes: Some(20),
            ..Default::default()
        };
        let results = engine.search(&query("rice").with_filters(filters));
        assert_eq!(ordinals(&results), vec![0, 2]);
    }

    #[test]
    fn test_filters_removing_everything_is_empty() {
        let engine = rice_corpus();
        let filters = RecipeFilters {
            cuisine: Some("french".into()),
            ..Default::default()
        };
        assert!(engine.search(&query("rice").with_filters(filters)).is_empty());
    }

    #[test]
    fn test_empty_query_returns_corpus_order() {
        let engine = rice_corpus();
        let results = engine.search(&query(""));
        assert_eq!(ordinals(&results), vec![0, 1, 2]);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_single_document_corpus() {
        let engine = HybridRanker::build(vec![doc(0, "Toast", "", 5, "bread butter")]).unwrap();
        for alpha in [0.0, 0.7, 1.0] {
            let results = engine.search(&query("bread").with_alpha(alpha));
            assert_eq!(results.len(), 1);
            assert!(results[0].score == 0.0 || results[0].score == 1.0);
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let engine = rice_corpus();
        let q = query("chicken rice cake").with_alpha(0.4);
        let first: Vec<(u32, f32)> = engine.search(&q).iter().map(|r| (r.ordinal, r.score)).collect();
        let second: Vec<(u32, f32)> = engine.search(&q).iter().map(|r| (r.ordinal, r.score)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scores_bounded_and_sorted() {
        let engine = rice_corpus();
        let results = engine.search(&query("rice cake fry soup soup"));
        assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_top_k_zero_and_oversized() {
        let engine = rice_corpus();
        assert!(engine.search(&query("rice").with_top_k(0)).is_empty());
        assert_eq!(engine.search(&query("rice").with_top_k(500)).len(), 3);
    }

    #[test]
    fn test_release_keeps_rankings() {
        let mut engine = rice_corpus();
        let q = query("rice");
        let before = engine.rank(&q.text, &q.tokens, q.alpha);
        assert!(engine.stats().source_tokens_retained);
        engine.release_source_documents();
        assert!(!engine.stats().source_tokens_retained);
        assert_eq!(engine.rank(&q.text, &q.tokens, q.alpha), before);
    }

    #[test]
    fn test_singular_query_matches_plural_ingredient() {
        use crate::corpus::{DocumentBuilder, RecipeRecord};
        use crate::text::TextNormalizer;

        let record = |name: &str, ingredients: &[&str]| RecipeRecord {
            name: Some(name.into()),
            minutes: Some(20),
            ingredients: Some(ingredients.iter().map(|s| s.to_string()).collect()),
            steps: Some(vec!["press into a pan".into()]),
            ..Default::default()
        };
        let documents = DocumentBuilder::default()
            .build(vec![
                record("Icebox Pie Crust", &["crushed cookies", "butter"]),
                record("Garden Salad", &["lettuce", "tomatoes"]),
            ])
            .unwrap();
        assert!(documents[0].tokens.iter().any(|t| t == "cookie"));
        let engine = HybridRanker::build(documents).unwrap();

        let tokens = TextNormalizer::default().normalize("cookie");
        let bm25 = engine.probabilistic().scores(&tokens);
        assert!(bm25[0] > 0.0);
        assert_eq!(bm25[1], 0.0);
        assert!(engine.lexical().scores("cookie")[0] > 0.0);

        let results = engine.search(&SearchQuery::new("cookie", tokens));
        assert_eq!(results[0].recipe.name, "Icebox Pie Crust");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_stats_and_accessors() {
        let engine = rice_corpus();
        let stats = engine.stats();
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.probabilistic_vocabulary, 9);
        assert_eq!(stats.k1, 1.5);
        assert_eq!(engine.len(), 3);
        assert!(!engine.is_empty());
        assert_eq!(engine.document(2).map(|r| r.minutes), Some(15));
        assert!(engine.document(3).is_none());
    }
}
