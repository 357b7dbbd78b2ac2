//! pantry-server: HTTP service for pantry hybrid recipe search.
//!
//! Provides the REST API and the startup sequence that builds the search
//! index in the background. Retrieval logic lives in `pantry-core`.

/// REST API layer: Axum router, HTTP handlers, models, metrics.
pub mod api;
/// Corpus loading and background index construction.
pub mod bootstrap;
