//! Term statistics for BM25 scoring.
//!
//! Maps terms to postings lists (document ordinal + term frequency) and keeps
//! per-document lengths, the corpus mean length, and a precomputed idf per
//! term. Built once from the full corpus; read-only afterwards.

use crate::config;
use crate::error::BuildError;
use std::collections::HashMap;

/// BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f32,
    /// Length normalization strength.
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: config::BM25_K1,
            b: config::BM25_B,
        }
    }
}

/// A single entry in a term's postings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Document ordinal.
    pub doc_id: u32,
    /// Number of times the term appears in this document.
    pub term_frequency: u32,
}

/// BM25 index over normalized token sequences.
#[derive(Debug)]
pub struct ProbabilisticIndex {
    /// term → postings, ascending `doc_id`.
    pub(crate) postings: HashMap<String, Vec<Posting>>,
    /// term → ln(1 + (N - df + 0.5) / (df + 0.5)), unclamped.
    pub(crate) idf: HashMap<String, f32>,
    /// ordinal → number of tokens.
    pub(crate) doc_lengths: Vec<u32>,
    pub(crate) avg_doc_length: f32,
    pub(crate) params: Bm25Params,
    source: Option<Vec<Vec<String>>>,
}

impl ProbabilisticIndex {
    /// Builds the index. Ordinal `i` is `documents[i]`.
    pub fn build(documents: Vec<Vec<String>>, params: Bm25Params) -> Result<Self, BuildError> {
        if documents.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }

        let n = documents.len();
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut doc_lengths = Vec::with_capacity(n);
        let mut total_length: u64 = 0;

        for (ordinal, tokens) in documents.iter().enumerate() {
            doc_lengths.push(tokens.len() as u32);
            total_length += tokens.len() as u64;

            let mut tf_map: HashMap<&str, u32> = HashMap::new();
            for token in tokens {
                *tf_map.entry(token.as_str()).or_insert(0) += 1;
            }
            for (term, tf) in tf_map {
                postings.entry(term.to_string()).or_default().push(Posting {
                    doc_id: ordinal as u32,
                    term_frequency: tf,
                });
            }
        }

        let n_f = n as f32;
        let idf = postings
            .iter()
            .map(|(term, list)| {
                let df = list.len() as f32;
                (term.clone(), (1.0 + (n_f - df + 0.5) / (df + 0.5)).ln())
            })
            .collect();

        Ok(Self {
            postings,
            idf,
            doc_lengths,
            avg_doc_length: total_length as f32 / n_f,
            params,
            source: Some(documents),
        })
    }

    /// Drops the raw token lists kept since construction. Scoring is unaffected.
    pub fn release_source_documents(&mut self) {
        if let Some(source) = self.source.take() {
            tracing::debug!(documents = source.len(), "Released BM25 source tokens");
        }
    }

    /// Raw token lists, until [`release_source_documents`](Self::release_source_documents).
    pub fn source_documents(&self) -> Option<&[Vec<String>]> {
        self.source.as_deref()
    }

    /// Number of indexed documents.
    pub fn doc_count(&self) -> u32 {
        self.doc_lengths.len() as u32
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    /// Mean document length in tokens.
    pub fn average_doc_length(&self) -> f32 {
        self.avg_doc_length
    }

    /// Token count of a document (0 for unknown ordinals).
    pub fn document_length(&self, ordinal: u32) -> u32 {
        self.doc_lengths.get(ordinal as usize).copied().unwrap_or(0)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.postings.get(term).map_or(0, |p| p.len() as u32)
    }

    /// Occurrences of `term` in a document.
    pub fn term_frequency(&self, ordinal: u32, term: &str) -> u32 {
        self.postings
            .get(term)
            .and_then(|list| {
                list.binary_search_by_key(&ordinal, |p| p.doc_id)
                    .ok()
                    .map(|i| list[i].term_frequency)
            })
            .unwrap_or(0)
    }

    /// Precomputed idf, 0.0 for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> f32 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Parameters the index scores with.
    pub fn params(&self) -> Bm25Params {
        self.params
    }
}
