//! faqbot - answer free-text questions from a fixed FAQ corpus.
//!
//! The closest stored question is found by TF-IDF weighting and cosine
//! similarity; its answer is returned when the similarity reaches a threshold,
//! and a fallback message is returned otherwise.
//!
//! # Example
//!
//! ```
//! use faqbot::corpus::QaPair;
//! use faqbot::retrieval::{EngineOptions, RetrievalEngine};
//!
//! let corpus = vec![
//!     QaPair::new("Как дела?", "Хорошо"),
//!     QaPair::new("Где ты?", "Дома"),
//! ];
//! let engine = RetrievalEngine::build(&corpus, EngineOptions::default());
//! assert_eq!(engine.find_best_answer("как дела", 0.2), "Хорошо");
//! ```

pub mod chat;
pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod output;
pub mod retrieval;

pub use retrieval::{RetrievalEngine, SharedEngine};
