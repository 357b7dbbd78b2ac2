//! Application context holding the engine lifecycle.
//!
//! The context starts `Uninitialized` and moves exactly once, to `Ready` or
//! `Failed`. Readers take a cheap `Arc` clone of the engine; the lock is never
//! held while a query runs.

use crate::engine::HybridRanker;
use crate::error::ContextError;
use parking_lot::RwLock;
use std::sync::Arc;

/// Lifecycle state of the search engine.
#[derive(Debug, Clone, Default)]
pub enum EngineStatus {
    /// Index construction has not finished.
    #[default]
    Uninitialized,
    /// Indices are built and queries are served.
    Ready(Arc<HybridRanker>),
    /// Index construction failed with this message.
    Failed(String),
}

impl EngineStatus {
    /// Short lowercase label: `initializing`, `ok`, or `failed`.
    pub fn label(&self) -> &'static str {
        match self {
            EngineStatus::Uninitialized => "initializing",
            EngineStatus::Ready(_) => "ok",
            EngineStatus::Failed(_) => "failed",
        }
    }
}

/// Thread-safe owner of the engine lifecycle.
#[derive(Debug, Default)]
pub struct SearchContext {
    status: RwLock<EngineStatus>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a built engine.
    pub fn mark_ready(&self, engine: HybridRanker) -> Result<(), ContextError> {
        let mut status = self.status.write();
        if !matches!(*status, EngineStatus::Uninitialized) {
            return Err(ContextError::AlreadyInitialized);
        }
        tracing::info!(documents = engine.len(), "Search engine ready");
        *status = EngineStatus::Ready(Arc::new(engine));
        Ok(())
    }

    /// Records a construction failure.
    pub fn mark_failed(&self, message: impl Into<String>) -> Result<(), ContextError> {
        let mut status = self.status.write();
        if !matches!(*status, EngineStatus::Uninitialized) {
            return Err(ContextError::AlreadyInitialized);
        }
        let message = message.into();
        tracing::error!(error = %message, "Search engine failed to initialize");
        *status = EngineStatus::Failed(message);
        Ok(())
    }

    /// The engine, or why it cannot be used.
    pub fn engine(&self) -> Result<Arc<HybridRanker>, ContextError> {
        match &*self.status.read() {
            EngineStatus::Ready(engine) => Ok(Arc::clone(engine)),
            EngineStatus::Uninitialized => Err(ContextError::NotReady),
            EngineStatus::Failed(msg) => Err(ContextError::Failed(msg.clone())),
        }
    }

    /// Snapshot of the current state.
    pub fn status(&self) -> EngineStatus {
        self.status.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.status.read(), EngineStatus::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Recipe};

    fn engine() -> HybridRanker {
        let docs = vec![Document::new(
            0,
            Recipe::default(),
            "egg toast".into(),
            vec!["egg".into(), "toast".into()],
        )];
        HybridRanker::build(docs).unwrap()
    }

    #[test]
    fn test_starts_uninitialized() {
        let ctx = SearchContext::new();
        assert_eq!(ctx.status().label(), "initializing");
        assert_eq!(ctx.engine().unwrap_err(), ContextError::NotReady);
        assert!(!ctx.is_ready());
    }

    #[test]
    fn test_ready_transition() {
        let ctx = SearchContext::new();
        ctx.mark_ready(engine()).unwrap();
        assert!(ctx.is_ready());
        assert_eq!(ctx.status().label(), "ok");
        assert_eq!(ctx.engine().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_transition() {
        let ctx = SearchContext::new();
        ctx.mark_failed("corpus missing").unwrap();
        assert_eq!(ctx.status().label(), "failed");
        assert_eq!(
            ctx.engine().unwrap_err(),
            ContextError::Failed("corpus missing".into())
        );
    }

    #[test]
    fn test_transitions_are_one_way() {
        let ctx = SearchContext::new();
        ctx.mark_ready(engine()).unwrap();
        assert_eq!(
            ctx.mark_failed("late").unwrap_err(),
            ContextError::AlreadyInitialized
        );
        assert_eq!(
            ctx.mark_ready(engine()).unwrap_err(),
            ContextError::AlreadyInitialized
        );
        assert!(ctx.is_ready());

        let ctx = SearchContext::new();
        ctx.mark_failed("boom").unwrap();
        assert_eq!(
            ctx.mark_ready(engine()).unwrap_err(),
            ContextError::AlreadyInitialized
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let ctx = Arc::new(SearchContext::new());
        let writer = {
            let ctx = Arc::clone(&ctx);
            std::thread::spawn(move || ctx.mark_ready(engine()))
        };
        writer.join().unwrap().unwrap();
        assert!(ctx.engine().is_ok());
    }
}
