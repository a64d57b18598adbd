//! Question retrieval over a fixed FAQ corpus.
//!
//! # Architecture
//!
//! - **tokenizer**: lowercase letter/digit tokens with stop-word removal
//! - **index**: document frequencies, smooth IDF and per-entry TF-IDF vectors
//! - **vectorizer**: query text to TF-IDF weights using the index's IDF table
//! - **ranker**: cosine similarity, best match and top-k ranking
//! - **engine**: `find_best_answer` and its threshold/fallback decision
//! - **shared**: atomic publication of rebuilt engines

pub mod engine;
pub mod index;
pub mod ranker;
pub mod shared;
pub mod sparse;
pub mod stopwords;
pub mod tokenizer;
pub mod vectorizer;

use crate::core::{Error, Result};

pub use engine::{
    Candidate, EngineOptions, IndexStats, Lookup, RetrievalEngine, DEFAULT_FALLBACK_MESSAGE,
};
pub use index::{CorpusEntry, CorpusIndex, DocumentVector};
pub use ranker::{best_match, cosine_similarity, rank, Match};
pub use shared::SharedEngine;
pub use sparse::SparseVector;
pub use stopwords::StopWordSet;
pub use tokenizer::{tokenize, Tokenizer};
pub use vectorizer::{QueryVector, QueryVectorizer};

/// Minimum similarity for a match when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Check that a similarity threshold lies in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(Error::invalid_argument(format!(
            "threshold must be between 0 and 1, got {threshold}"
        )))
    }
}
