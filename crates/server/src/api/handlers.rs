//! HTTP request handlers and shared application state.
//!
//! Handlers are wired into the router by
//! [`create_router`](crate::api::create_router). Every handler reads the engine
//! through the [`SearchContext`], so requests that arrive while the index is
//! still being built get a 503 instead of blocking.

use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use pantry_core::config;
use pantry_core::context::{EngineStatus, SearchContext};
use pantry_core::document::Bm25Source;
use pantry_core::engine::SearchQuery;
use pantry_core::text::TextNormalizer;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<SearchContext>,
    /// Produces the BM25 query tokens.
    pub normalizer: Arc<TextNormalizer>,
    pub bm25_source: Bm25Source,
    pub prometheus_handle: PrometheusHandle,
    pub start_time: Instant,
}

fn validate_search(req: &SearchRequest) -> Result<(), ApiError> {
    if req.query.len() > config::MAX_QUERY_LEN {
        return Err(ApiError::BadRequest(format!(
            "query exceeds maximum length of {} bytes",
            config::MAX_QUERY_LEN
        )));
    }
    if req.top_k == 0 || req.top_k > config::MAX_TOP_K {
        return Err(ApiError::BadRequest(format!(
            "top_k must be 1-{}",
            config::MAX_TOP_K
        )));
    }
    if !req.alpha.is_finite() || !(0.0..=1.0).contains(&req.alpha) {
        return Err(ApiError::BadRequest("alpha must be between 0 and 1".into()));
    }
    Ok(())
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let status = state.context.status();
    let (code, documents, error) = match &status {
        EngineStatus::Ready(engine) => (StatusCode::OK, engine.len(), None),
        EngineStatus::Uninitialized => (StatusCode::SERVICE_UNAVAILABLE, 0, None),
        EngineStatus::Failed(msg) => (StatusCode::SERVICE_UNAVAILABLE, 0, Some(msg.clone())),
    };

    (
        code,
        Json(HealthResponse {
            status: status.label().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
            documents,
            error,
        }),
    )
}

/// `POST /search`
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    validate_search(&req)?;
    let engine = state.context.engine()?;

    let tokens = state.normalizer.normalize(&req.query);
    let filters = req.filters();
    let filtered = !filters.prepare().is_pass_through();
    let query = SearchQuery::new(req.query.as_str(), tokens)
        .with_top_k(req.top_k)
        .with_alpha(req.alpha)
        .with_filters(filters);

    let results: Vec<RecipeResult> = engine.search(&query).iter().map(RecipeResult::from).collect();
    let count = results.len();

    metrics::record_search(filtered, count);
    tracing::info!(
        top_k = req.top_k,
        alpha = req.alpha,
        filtered,
        results = count,
        "Search completed"
    );
    Ok(Json(SearchResponse { results, count }))
}

/// `GET /stats`
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.context.engine()?.stats();
    Ok(Json(StatsResponse {
        documents: stats.documents,
        lexical_vocabulary: stats.lexical_vocabulary,
        bm25_vocabulary: stats.probabilistic_vocabulary,
        average_token_length: stats.average_token_length,
        k1: stats.k1,
        b: stats.b,
        bm25_source: state.bm25_source.as_str().to_string(),
        source_tokens_retained: stats.source_tokens_retained,
    }))
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.prometheus_handle.render()
}
