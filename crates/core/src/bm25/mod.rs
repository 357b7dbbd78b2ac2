//! BM25 probabilistic relevance index.
//!
//! Term statistics are computed once from the corpus token sequences; queries
//! are scored with the saturating BM25 term-frequency formula.

/// Postings lists, document lengths, and idf table.
pub mod inverted_index;
/// BM25 query scoring.
pub mod scorer;

pub use inverted_index::{Bm25Params, Posting, ProbabilisticIndex};
