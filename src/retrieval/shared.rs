//! Publication point for the current engine.
//!
//! Readers take an `Arc` snapshot and query it without holding any lock.
//! Rebuilds construct a complete engine first and then swap the pointer, so a
//! reader never observes a partially built index.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::engine::{EngineOptions, RetrievalEngine};
use crate::corpus::QaPair;

pub struct SharedEngine {
    current: RwLock<Arc<RetrievalEngine>>,
}

impl SharedEngine {
    pub fn new(engine: RetrievalEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// The engine as of now. Later swaps do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<RetrievalEngine> {
        Arc::clone(&self.current.read())
    }

    /// Publish `engine`, returning the one it replaced.
    pub fn replace(&self, engine: RetrievalEngine) -> Arc<RetrievalEngine> {
        let engine = Arc::new(engine);
        let stats = engine.stats();
        let previous = std::mem::replace(&mut *self.current.write(), engine);
        info!(
            entries = stats.entries,
            skipped = stats.skipped,
            vocabulary = stats.vocabulary,
            "published new engine"
        );
        previous
    }

    /// Build an engine for `pairs` with the current options and publish it.
    pub fn rebuild(&self, pairs: &[QaPair]) -> Arc<RetrievalEngine> {
        let options = self.snapshot().options();
        self.rebuild_with(pairs, options)
    }

    pub fn rebuild_with(&self, pairs: &[QaPair], options: EngineOptions) -> Arc<RetrievalEngine> {
        let engine = RetrievalEngine::build(pairs, options);
        self.replace(engine)
    }
}
