//! Startup index construction.
//!
//! The listener is bound before the corpus is read; [`initialize`] then builds
//! both indices on a blocking worker and publishes the outcome to the shared
//! [`SearchContext`]. Until then every search answers 503.

use crate::api::metrics;
use pantry_core::bm25::Bm25Params;
use pantry_core::context::SearchContext;
use pantry_core::corpus::{load_corpus, DocumentBuilder};
use pantry_core::document::Bm25Source;
use pantry_core::engine::HybridRanker;
use pantry_core::error::CorpusError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Everything needed to build the engine from disk.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub corpus: PathBuf,
    pub bm25_source: Bm25Source,
    pub params: Bm25Params,
    /// Keep the BM25 source token lists after construction.
    pub keep_source_tokens: bool,
}

/// Loads the corpus and builds the engine. Blocking.
pub fn build_engine(config: &IndexConfig) -> Result<HybridRanker, CorpusError> {
    let start = Instant::now();
    let records = load_corpus(&config.corpus)?;
    let documents = DocumentBuilder::default()
        .with_source(config.bm25_source)
        .build(records)?;
    let mut engine = HybridRanker::build_with_params(documents, config.params)?;
    if !config.keep_source_tokens {
        engine.release_source_documents();
    }
    tracing::info!(
        corpus = %config.corpus.display(),
        bm25_source = config.bm25_source.as_str(),
        documents = engine.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Search index ready"
    );
    Ok(engine)
}

/// Builds the engine off the async runtime and records the result in `context`.
pub async fn initialize(context: Arc<SearchContext>, config: IndexConfig) {
    let outcome = tokio::task::spawn_blocking(move || build_engine(&config)).await;
    let published = match outcome {
        Ok(Ok(engine)) => {
            metrics::update_engine_metrics(&engine);
            context.mark_ready(engine)
        }
        Ok(Err(e)) => context.mark_failed(e.to_string()),
        Err(e) => context.mark_failed(format!("index build task panicked: {e}")),
    };
    if let Err(e) = published {
        tracing::warn!("Discarding index build result: {}", e);
    }
}
