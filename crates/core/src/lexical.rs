//! TF-IDF vector-space index with cosine similarity.
//!
//! Each document becomes a sparse vector over a vocabulary fixed at build
//! time: raw term count × smoothed idf, L2-normalized. A query is vectorized
//! the same way and scored against every document by dot product, which for
//! unit vectors equals the cosine. Query terms outside the vocabulary carry
//! no weight; a query with no known terms scores 0.0 everywhere.
//!
//! idf(t) = ln((1 + N) / (1 + df(t))) + 1, so a term present in every
//! document still has weight 1.

use crate::error::BuildError;
use crate::search::rank::top_k;
use crate::search::types::{RankedResult, ScoreVector};
use crate::text::analyze;
use std::collections::{BTreeMap, HashMap};

/// Inverted TF-IDF index over the lexical text blobs.
#[derive(Debug)]
pub struct LexicalIndex {
    /// term → term id, assigned in first-occurrence order.
    vocabulary: HashMap<String, u32>,
    /// term id → smoothed idf.
    idf: Vec<f32>,
    /// term id → (ordinal, normalized weight), ascending ordinal.
    postings: Vec<Vec<(u32, f32)>>,
    doc_count: u32,
}

impl LexicalIndex {
    /// Builds the index. Ordinal `i` is `texts[i]`.
    pub fn build<S: AsRef<str>>(texts: &[S]) -> Result<Self, BuildError> {
        if texts.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }

        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut doc_terms: Vec<Vec<(u32, u32)>> = Vec::with_capacity(texts.len());
        let mut doc_freq: Vec<u32> = Vec::new();

        for text in texts {
            let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
            for term in analyze(text.as_ref()).iter() {
                let id = match vocabulary.get(term) {
                    Some(&id) => id,
                    None => {
                        let id = vocabulary.len() as u32;
                        vocabulary.insert(term.to_string(), id);
                        doc_freq.push(0);
                        id
                    }
                };
                *counts.entry(id).or_insert(0) += 1;
            }
            for &id in counts.keys() {
                doc_freq[id as usize] += 1;
            }
            doc_terms.push(counts.into_iter().collect());
        }

        let n = texts.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); idf.len()];
        for (ordinal, terms) in doc_terms.iter().enumerate() {
            let weights: Vec<f32> = terms
                .iter()
                .map(|&(id, tf)| tf as f32 * idf[id as usize])
                .collect();
            let norm = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
            if norm == 0.0 {
                continue;
            }
            for (&(id, _), w) in terms.iter().zip(weights) {
                postings[id as usize].push((ordinal as u32, w / norm));
            }
        }

        tracing::debug!(
            documents = texts.len(),
            vocabulary = vocabulary.len(),
            "TF-IDF index built"
        );

        Ok(Self {
            vocabulary,
            idf,
            postings,
            doc_count: texts.len() as u32,
        })
    }

    /// Number of indexed documents.
    pub fn doc_count(&self) -> u32 {
        self.doc_count
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Smoothed idf of `term`, or `None` if it is not in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary
            .get(term)
            .map(|&id| self.idf[id as usize])
    }

    /// Cosine similarity of `query` against every document, indexed by ordinal.
    pub fn scores(&self, query: &str) -> ScoreVector {
        let mut scores = vec![0.0f32; self.doc_count as usize];

        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for term in analyze(query).iter() {
            if let Some(&id) = self.vocabulary.get(term) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let weights: Vec<(u32, f32)> = counts
            .into_iter()
            .map(|(id, tf)| (id, tf as f32 * self.idf[id as usize]))
            .collect();
        let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return scores;
        }

        for (id, w) in weights {
            let qw = w / norm;
            for &(ordinal, dw) in &self.postings[id as usize] {
                scores[ordinal as usize] += qw * dw;
            }
        }
        for s in scores.iter_mut() {
            *s = s.clamp(0.0, 1.0);
        }
        scores
    }

    /// Best `min(k, N)` documents for `query`, score desc then ordinal asc.
    pub fn search(&self, query: &str, k: usize) -> RankedResult {
        top_k(&self.scores(query), k)
    }
}
