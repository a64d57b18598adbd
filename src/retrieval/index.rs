//! TF-IDF index over the corpus questions.
//!
//! Uses raw term counts, smooth IDF `ln((N + 1) / (df + 1)) + 1` and keeps
//! each document vector unnormalized alongside its L2 norm.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tracing::debug;

use super::sparse::SparseVector;
use super::tokenizer::Tokenizer;
use crate::corpus::QaPair;

/// A retained corpus row.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry {
    /// 0-based position of the source row in the corpus.
    pub row: usize,
    pub question: String,
    pub tokens: Vec<String>,
    pub answer: String,
}

/// TF-IDF weights of one entry plus their Euclidean length.
#[derive(Debug, Clone)]
pub struct DocumentVector {
    pub vector: SparseVector,
    pub norm: f64,
}

/// Immutable TF-IDF index built from a corpus snapshot.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    vocab: HashMap<String, u32>,
    df: Vec<u32>,
    idf: Vec<f64>,
    entries: Vec<CorpusEntry>,
    documents: Vec<DocumentVector>,
    skipped: usize,
}

impl CorpusIndex {
    /// Build the index. Rows whose question is blank or only stop words are skipped.
    pub fn build(pairs: &[QaPair], tokenizer: &Tokenizer) -> Self {
        let analyzed: Vec<Option<Vec<String>>> = pairs
            .par_iter()
            .map(|pair| {
                let question = pair.question.trim();
                if question.is_empty() {
                    return None;
                }
                let tokens = tokenizer.analyze(question);
                (!tokens.is_empty()).then_some(tokens)
            })
            .collect();

        let entries: Vec<CorpusEntry> = pairs
            .iter()
            .zip(analyzed)
            .enumerate()
            .filter_map(|(row, (pair, tokens))| {
                tokens.map(|tokens| CorpusEntry {
                    row,
                    question: pair.question.trim().to_string(),
                    tokens,
                    answer: pair.answer.clone(),
                })
            })
            .collect();
        let skipped = pairs.len() - entries.len();

        // Ids are assigned in order of first appearance so builds are deterministic.
        let mut vocab: HashMap<String, u32> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        for entry in &entries {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in entry.tokens.iter().filter(|t| seen.insert(t.as_str())) {
                let next = vocab.len() as u32;
                let id = *vocab.entry(token.clone()).or_insert(next);
                if id as usize == df.len() {
                    df.push(0);
                }
                df[id as usize] += 1;
            }
        }

        let n = entries.len() as f64;
        let idf: Vec<f64> = df.iter().map(|&d| smooth_idf(n, d)).collect();

        let documents: Vec<DocumentVector> = entries
            .iter()
            .map(|entry| {
                let vector = weigh(&entry.tokens, |token| {
                    vocab.get(token).map(|&id| (id, idf[id as usize]))
                });
                let norm = vector.norm();
                DocumentVector { vector, norm }
            })
            .collect();

        debug!(
            rows = pairs.len(),
            entries = entries.len(),
            skipped,
            vocabulary = vocab.len(),
            "built corpus index"
        );

        Self {
            vocab,
            df,
            idf,
            entries,
            documents,
            skipped,
        }
    }

    /// Number of retained entries (`N`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows dropped because their question had no retainable tokens.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn documents(&self) -> &[DocumentVector] {
        &self.documents
    }

    pub fn term_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    pub fn document_frequency(&self, token: &str) -> Option<u32> {
        self.term_id(token).map(|id| self.df[id as usize])
    }

    pub fn idf(&self, token: &str) -> Option<f64> {
        self.term_id(token).map(|id| self.idf[id as usize])
    }

    /// Weight for a term no entry contains: the IDF of a term with df = 0.
    pub fn default_idf(&self) -> f64 {
        smooth_idf(self.entries.len() as f64, 0)
    }
}

fn smooth_idf(n: f64, df: u32) -> f64 {
    ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}

/// Weigh `tokens` by `tf * idf`, with `lookup` resolving a token to its id and IDF.
/// Tokens that `lookup` rejects are left out.
pub(crate) fn weigh<F>(tokens: &[String], lookup: F) -> SparseVector
where
    F: Fn(&str) -> Option<(u32, f64)>,
{
    let mut tf: HashMap<u32, (u32, f64)> = HashMap::new();
    for token in tokens {
        if let Some((id, idf)) = lookup(token) {
            tf.entry(id).or_insert((0, idf)).0 += 1;
        }
    }
    SparseVector::from_pairs(
        tf.into_iter()
            .map(|(id, (count, idf))| (id, count as f64 * idf))
            .collect(),
    )
}
