//! Query vectorization against a built index.

use std::collections::HashMap;

use super::index::{weigh, CorpusIndex};
use super::sparse::SparseVector;
use super::tokenizer::Tokenizer;

/// TF-IDF weights of a query, restricted to indexed terms, and the norm over
/// all of its terms.
///
/// Out-of-vocabulary terms cannot meet any document, so they are kept only as
/// their contribution to `norm`.
#[derive(Debug, Clone)]
pub struct QueryVector {
    pub vector: SparseVector,
    pub norm: f64,
    /// Number of distinct query terms missing from the index.
    pub unknown_terms: usize,
}

/// Turns query text into a [`QueryVector`] using the index's IDF table.
pub struct QueryVectorizer<'a> {
    tokenizer: &'a Tokenizer,
    index: &'a CorpusIndex,
}

impl<'a> QueryVectorizer<'a> {
    pub fn new(tokenizer: &'a Tokenizer, index: &'a CorpusIndex) -> Self {
        Self { tokenizer, index }
    }

    /// Vectorize `query`. Returns `None` when no token survives stop-word removal.
    pub fn vectorize(&self, query: &str) -> Option<QueryVector> {
        let tokens = self.tokenizer.analyze(query);
        if tokens.is_empty() {
            return None;
        }

        let vector = weigh(&tokens, |token| {
            self.index
                .term_id(token)
                .zip(self.index.idf(token))
        });

        // Unseen terms are weighted as if no entry contained them.
        let default_idf = self.index.default_idf();
        let mut unknown: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            if self.index.term_id(token).is_none() {
                *unknown.entry(token.as_str()).or_insert(0) += 1;
            }
        }
        let unknown_sq: f64 = unknown
            .values()
            .map(|&tf| {
                let w = tf as f64 * default_idf;
                w * w
            })
            .sum();

        let norm = (vector.squared_norm() + unknown_sq).sqrt();
        Some(QueryVector {
            vector,
            norm,
            unknown_terms: unknown.len(),
        })
    }
}
