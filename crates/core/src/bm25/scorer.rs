//! BM25 scoring engine.
//!
//! Scores every document against a token query with
//! `idf(t) * tf * (k1 + 1) / (tf + k1 * (1 - b + b * dl / avgdl))`, summed over
//! query tokens present in the document. Repeated query tokens count once per
//! occurrence. Tokens absent from a document, or from the vocabulary,
//! contribute nothing.

use crate::bm25::inverted_index::ProbabilisticIndex;
use crate::search::rank::top_k;
use crate::search::types::{RankedResult, ScoreVector};

impl ProbabilisticIndex {
    /// BM25 score of `query` for every document, indexed by ordinal.
    pub fn scores<S: AsRef<str>>(&self, query: &[S]) -> ScoreVector {
        let mut scores = vec![0.0f32; self.doc_lengths.len()];
        if query.is_empty() || self.avg_doc_length == 0.0 {
            return scores;
        }

        let k1 = self.params.k1;
        let b = self.params.b;
        let avgdl = self.avg_doc_length;

        for token in query {
            let token = token.as_ref();
            let Some(postings) = self.postings.get(token) else {
                continue;
            };
            let idf = self.idf(token);
            for posting in postings {
                let dl = self.doc_lengths[posting.doc_id as usize] as f32;
                let tf = posting.term_frequency as f32;
                let tf_norm = (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * dl / avgdl));
                scores[posting.doc_id as usize] += idf * tf_norm;
            }
        }
        scores
    }

    /// Best `min(k, N)` documents for `query`, score desc then ordinal asc.
    pub fn search<S: AsRef<str>>(&self, query: &[S], k: usize) -> RankedResult {
        top_k(&self.scores(query), k)
    }
}
