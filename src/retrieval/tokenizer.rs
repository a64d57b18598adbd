//! Text normalization shared by documents and queries.

use once_cell::sync::Lazy;
use regex::Regex;

use super::stopwords::StopWordSet;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

/// Split text into lowercase tokens of Unicode letters and digits.
///
/// Every run of other characters acts as a single separator.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_ALPHANUMERIC
        .replace_all(text, " ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Tokenizer bound to a stop-word set.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: StopWordSet,
}

impl Tokenizer {
    pub fn new(stop_words: StopWordSet) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Drop stop words, keeping the order of the remaining tokens.
    pub fn filter_stop_words(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Tokenize then filter.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.filter_stop_words(tokenize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("Как ДЕЛА?"), vec!["как", "дела"]);
        assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_collapses_separator_runs() {
        assert_eq!(tokenize("  a--b__c...42  "), vec!["a", "b", "c", "42"]);
    }

    #[test]
    fn test_tokenize_mixed_alphabets_and_digits() {
        assert_eq!(tokenize("Wi-Fi пароль:12345"), vec!["wi", "fi", "пароль", "12345"]);
    }

    #[test]
    fn test_tokenize_no_alphanumeric_content() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("?!... --- ***").is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let tokenizer = Tokenizer::new(StopWordSet::empty().with_extra(["b"]));
        let tokens = vec!["c".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(tokenizer.filter_stop_words(tokens), vec!["c", "a"]);
    }

    #[test]
    fn test_analyze_with_builtin_stop_words() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.analyze("Как дела?"), vec!["дела"]);
        assert!(tokenizer.analyze("Где ты?").is_empty());
        assert_eq!(tokenizer.analyze("What is the refund policy"), vec!["refund", "policy"]);
    }
}
