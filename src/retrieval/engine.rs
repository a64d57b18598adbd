//! The retrieval engine: tokenizer, index, vectorizer and ranker behind one call.

use serde::Serialize;
use tracing::debug;

use super::index::{CorpusEntry, CorpusIndex};
use super::ranker::{best_match, rank, Match};
use super::stopwords::StopWordSet;
use super::tokenizer::Tokenizer;
use super::vectorizer::QueryVectorizer;
use crate::corpus::QaPair;

/// Reply used when no sufficiently similar question exists.
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "Sorry, I don't know the answer to that yet. Try rephrasing your question.";

/// Build-time options of an engine.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub stop_words: StopWordSet,
    pub fallback_message: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            stop_words: StopWordSet::builtin(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    /// The best entry met the threshold.
    Matched {
        entry: &'a CorpusEntry,
        score: f64,
    },
    /// The query had no tokens left after normalization.
    NoContent,
    /// Nothing matched, or the best match scored below the threshold.
    NoConfidentMatch { best_score: Option<f64> },
}

/// A ranked candidate for `search`.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// 1-based corpus row.
    pub row: usize,
    pub question: String,
    pub answer: String,
    pub score: f64,
}

/// Index statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexStats {
    pub entries: usize,
    pub skipped: usize,
    pub vocabulary: usize,
}

/// Immutable question-answering engine over one corpus snapshot.
///
/// Holds no mutable state, so it can be shared across threads and queried
/// concurrently. A changed corpus means building a new engine.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    tokenizer: Tokenizer,
    index: CorpusIndex,
    fallback_message: String,
}

impl RetrievalEngine {
    pub fn build(pairs: &[QaPair], options: EngineOptions) -> Self {
        let tokenizer = Tokenizer::new(options.stop_words);
        let index = CorpusIndex::build(pairs, &tokenizer);
        Self {
            tokenizer,
            index,
            fallback_message: options.fallback_message,
        }
    }

    /// Options this engine was built with, for building its successor.
    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            stop_words: self.tokenizer.stop_words().clone(),
            fallback_message: self.fallback_message.clone(),
        }
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn fallback_message(&self) -> &str {
        &self.fallback_message
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self.index.len(),
            skipped: self.index.skipped(),
            vocabulary: self.index.vocabulary_size(),
        }
    }

    /// Answer `query` with the stored answer of the closest question, or the
    /// fallback message when nothing scores at least `threshold`.
    pub fn find_best_answer(&self, query: &str, threshold: f64) -> &str {
        match self.lookup(query, threshold) {
            Lookup::Matched { entry, .. } => &entry.answer,
            Lookup::NoContent | Lookup::NoConfidentMatch { .. } => &self.fallback_message,
        }
    }

    pub fn lookup(&self, query: &str, threshold: f64) -> Lookup<'_> {
        let vectorizer = QueryVectorizer::new(&self.tokenizer, &self.index);
        let Some(query_vector) = vectorizer.vectorize(query) else {
            debug!("query has no content");
            return Lookup::NoContent;
        };

        match best_match(&query_vector, self.index.documents()) {
            Some(Match { index, score }) if score >= threshold => {
                let entry = &self.index.entries()[index];
                debug!(row = entry.row + 1, score, "matched");
                Lookup::Matched { entry, score }
            }
            best => {
                let best_score = best.map(|m| m.score);
                debug!(?best_score, threshold, "no confident match");
                Lookup::NoConfidentMatch { best_score }
            }
        }
    }

    /// The `top_k` most similar entries regardless of threshold.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<Candidate> {
        let vectorizer = QueryVectorizer::new(&self.tokenizer, &self.index);
        let Some(query_vector) = vectorizer.vectorize(query) else {
            return Vec::new();
        };
        rank(&query_vector, self.index.documents(), top_k)
            .into_iter()
            .map(|m| {
                let entry = &self.index.entries()[m.index];
                Candidate {
                    row: entry.row + 1,
                    question: entry.question.clone(),
                    answer: entry.answer.clone(),
                    score: m.score,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RetrievalEngine {
        RetrievalEngine::build(
            &[QaPair::new("Как дела?", "Хорошо"), QaPair::new("Где ты?", "Дома")],
            EngineOptions::default(),
        )
    }

    #[test]
    fn test_find_best_answer_matches() {
        let engine = sample();
        assert_eq!(engine.find_best_answer("как дела", 0.2), "Хорошо");
    }

    #[test]
    fn test_unknown_word_falls_back() {
        let engine = sample();
        assert_eq!(
            engine.find_best_answer("абракадабра", 0.2),
            DEFAULT_FALLBACK_MESSAGE
        );
    }

    #[test]
    fn test_stop_words_only_is_no_content() {
        let engine = sample();
        assert_eq!(engine.lookup("где ты?", 0.0), Lookup::NoContent);
        assert_eq!(engine.find_best_answer("?!", 0.0), DEFAULT_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_threshold_above_best_score_falls_back() {
        let engine = RetrievalEngine::build(
            &[QaPair::new("refund policy details", "30 days")],
            EngineOptions::default(),
        );
        let Lookup::Matched { score, .. } = engine.lookup("refund", 0.0) else {
            panic!("expected a match");
        };
        assert!(score < 1.0);
        assert_eq!(engine.find_best_answer("refund", score), "30 days");
        assert!(matches!(
            engine.lookup("refund", score + 1e-9),
            Lookup::NoConfidentMatch { best_score: Some(_) }
        ));
    }

    #[test]
    fn test_empty_corpus_always_falls_back() {
        let engine = RetrievalEngine::build(&[], EngineOptions::default());
        assert_eq!(
            engine.lookup("anything", 0.0),
            Lookup::NoConfidentMatch { best_score: None }
        );
    }

    #[test]
    fn test_custom_fallback_and_stop_words() {
        let options = EngineOptions {
            stop_words: StopWordSet::builtin().with_extra(["пожалуйста"]),
            fallback_message: "Не знаю".to_string(),
        };
        let engine = RetrievalEngine::build(&[QaPair::new("Как дела?", "Хорошо")], options);
        assert_eq!(engine.find_best_answer("пожалуйста", 0.0), "Не знаю");
        assert_eq!(engine.find_best_answer("дела, пожалуйста", 0.5), "Хорошо");
    }

    #[test]
    fn test_duplicate_questions_first_wins() {
        let engine = RetrievalEngine::build(
            &[
                QaPair::new("opening hours", "first"),
                QaPair::new("opening hours", "second"),
            ],
            EngineOptions::default(),
        );
        assert_eq!(engine.find_best_answer("opening hours", 0.2), "first");
    }

    #[test]
    fn test_search_reports_rows_and_scores() {
        let engine = RetrievalEngine::build(
            &[
                QaPair::new("", "skipped"),
                QaPair::new("reset password", "Use the link"),
                QaPair::new("change password", "Open settings"),
            ],
            EngineOptions::default(),
        );
        let results = engine.search("reset my password", 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].row, 2);
        assert!(results[0].score > results[1].score);
        assert_eq!(engine.stats().skipped, 1);
    }
}
