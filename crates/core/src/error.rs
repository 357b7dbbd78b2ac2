//! Error types for index construction, corpus loading, and engine lifecycle.
//!
//! Only construction and lifecycle failures are errors. Per-query anomalies
//! (empty query, unknown terms, filters that remove every document) produce
//! ordinary, possibly empty, result sets.

use std::path::PathBuf;

/// Index construction failed. Fatal to startup.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The corpus contains no documents.
    #[error("cannot build an index over an empty corpus")]
    EmptyCorpus,
    /// A record lacks a field the indices need.
    #[error("document {ordinal} is missing required field `{field}`")]
    MissingField {
        /// Ordinal of the offending record.
        ordinal: u32,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A document's ordinal does not match its position in the table.
    #[error("document at position {expected} carries ordinal {found}")]
    OrdinalMismatch {
        /// Position in the document table.
        expected: u32,
        /// Ordinal stored on the document.
        found: u32,
    },
}

/// Reading or decoding a corpus file failed.
#[derive(thiserror::Error, Debug)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A record could not be decoded. `line` is set for JSON Lines input.
    #[error("invalid corpus record{}: {source}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Json {
        /// 1-based line number (JSON Lines only).
        line: Option<usize>,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// Decoded records did not form a valid corpus.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// The engine cannot answer queries yet, or never will.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// Index construction has not finished.
    #[error("search index is still being built")]
    NotReady,
    /// Index construction failed.
    #[error("search index failed to initialize: {0}")]
    Failed(String),
    /// The lifecycle already left the `Uninitialized` state.
    #[error("search context was already initialized")]
    AlreadyInitialized,
}
