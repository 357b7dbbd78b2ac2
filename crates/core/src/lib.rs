//! # pantry-core
//!
//! Hybrid recipe retrieval: a TF-IDF cosine index and a BM25 index over the
//! same corpus, fused by weighted min-max normalization, followed by diet,
//! cuisine, and cooking-time filters.
//!
//! This is the core library crate with zero async dependencies. The HTTP
//! service lives in `pantry-server`.

/// BM25 probabilistic index: postings, term statistics, and scoring.
pub mod bm25;
/// Global configuration constants: limits, defaults, and tuning parameters.
pub mod config;
/// Engine lifecycle: `Uninitialized`, `Ready`, or `Failed`.
pub mod context;
/// Corpus records, loading from JSON / JSON Lines, and document preparation.
pub mod corpus;
/// Core document types: `Recipe`, `Document`, and `Bm25Source`.
pub mod document;
/// The hybrid ranker tying both indices, fusion, and filters together.
pub mod engine;
/// Error types for construction, loading, and lifecycle.
pub mod error;
/// Offline relevance metrics: precision, recall, F1, and nDCG.
pub mod eval;
/// TF-IDF vector-space index with cosine similarity.
pub mod lexical;
/// Search primitives: ranking, score fusion, filters, and result types.
pub mod search;
/// Text front end: lexical analyzer and query normalizer.
pub mod text;

pub use context::{EngineStatus, SearchContext};
pub use document::{Bm25Source, Document, Recipe};
pub use engine::{EngineStats, HybridRanker, SearchQuery};
pub use error::{BuildError, ContextError, CorpusError};
