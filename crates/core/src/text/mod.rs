//! Text front end.
//!
//! The lexical analyzer splits the precomputed TF-IDF text blob and raw query
//! strings into terms. The normalizer turns raw recipe text and queries into
//! the cleaned, stop-word-free, lemmatized tokens consumed by BM25.

/// Lexical analyzer used by the TF-IDF index.
pub mod analyzer;
/// Query and document normalization: cleaning, stop words, lemmatization.
pub mod normalize;

pub use analyzer::{analyze, Terms};
pub use normalize::{LemmaError, Lemmatizer, SuffixLemmatizer, TextNormalizer};
