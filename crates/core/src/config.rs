//! Global configuration constants for pantry.
//!
//! Ranking parameters, document weighting, and request limits are defined here.
//! These are compile-time constants; runtime configuration is handled via CLI
//! arguments in the server binary and per-request fields of the search API.

/// BM25 term frequency saturation parameter.
///
/// Controls how quickly repeated occurrences of a term stop adding score.
pub const BM25_K1: f32 = 1.5;

/// BM25 document length normalization parameter.
///
/// 0.0 = no length normalization, 1.0 = full normalization.
pub const BM25_B: f32 = 0.75;

/// Default fusion weight given to the BM25 score.
///
/// The TF-IDF score receives `1 - alpha`.
pub const DEFAULT_ALPHA: f32 = 0.7;

/// Added to the denominator of min-max normalization so that a score vector
/// in which every document ties normalizes to zeros instead of NaN.
pub const NORMALIZATION_EPSILON: f32 = 1e-8;

/// Default number of results returned by a search.
pub const DEFAULT_TOP_K: usize = 10;

/// Maximum number of results (`top_k`) per search request.
pub const MAX_TOP_K: usize = 1_000;

/// Maximum length of a raw query string in bytes.
pub const MAX_QUERY_LEN: usize = 4_096;

/// Number of times title terms are repeated in the lexical text blob.
pub const TITLE_WEIGHT: usize = 2;

/// Number of times ingredient terms are repeated in the lexical text blob.
pub const INGREDIENT_WEIGHT: usize = 5;

/// Number of times step terms are repeated in the lexical text blob.
pub const STEP_WEIGHT: usize = 1;

/// Shortest token the lexical analyzer keeps, in characters.
pub const MIN_LEXICAL_TOKEN_LEN: usize = 2;

/// Cuisine selections that mean "no cuisine filter".
///
/// Compared after trimming, lowercasing, and collapsing inner whitespace.
pub const CUISINE_PASSTHROUGH: &[&str] = &[
    "",
    "all",
    "all cuisines",
    "all cuisine",
    "any",
    "any cuisine",
    "none",
];

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of concurrent in-flight requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Maximum HTTP request body size in bytes (64 KB).
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
