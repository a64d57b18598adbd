//! Built-in stop words.

use std::collections::HashSet;

use once_cell::sync::Lazy;

const RUSSIAN: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "её", "мне", "было", "вот", "от", "меня", "еще", "ещё", "нет", "о", "из", "ему", "теперь",
    "когда", "даже", "ну", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до", "вас",
    "нибудь", "уж", "вам", "ведь", "там", "потом", "себя", "ей", "может", "они", "тут", "где",
    "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем", "была", "сам", "чтоб", "без",
    "будто", "чего", "раз", "тоже", "себе", "под", "будет", "ж", "тогда", "кто", "этот",
    "того", "потому", "этого", "какой", "ним", "здесь", "этом", "почти", "мой", "тем",
    "чтобы", "нее", "были", "куда", "зачем", "всех", "при", "об", "хоть", "после", "над",
    "тот", "через", "эти", "нас", "про", "всего", "них", "какая", "разве", "эту", "моя",
    "свою", "этой", "перед", "том", "такой", "им", "более", "всю", "между", "это",
];

const ENGLISH: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "to", "and", "or", "for", "with", "this",
    "that", "be", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can", "shall", "not", "no",
    "but", "if", "at", "by", "from", "as", "into", "about", "up", "out", "so", "its", "you",
    "your", "i", "my", "we", "our", "they", "them", "their", "he", "she", "his", "her", "me",
    "what", "how", "where", "when", "who", "which", "there", "here",
];

static BUILTIN: Lazy<HashSet<&'static str>> =
    Lazy::new(|| RUSSIAN.iter().chain(ENGLISH.iter()).copied().collect());

/// Immutable set of filler tokens removed before indexing and querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// The built-in Russian and English stop words.
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// An empty set; every token is kept.
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Extend the set with additional words, lowercased.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWordSet {
    fn default() -> Self {
        Self::builtin()
    }
}
