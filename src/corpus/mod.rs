//! Corpus files: loading, validation, editing and saving question/answer rows.
//!
//! Rows are validated once, here, and handed to the index as typed [`QaPair`]s.
//! Two on-disk formats are understood, chosen by file extension:
//!
//! - `.json`: a top-level array of `{"question": ..., "answer": ...}` objects,
//!   or an object with an `entries` array of them;
//! - `.toml`: `[[entries]]` tables with `question` and `answer` keys.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::core::{Error, Result};

/// One question/answer row of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// On-disk corpus format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    Json,
    Toml,
}

impl CorpusFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[derive(Serialize)]
struct TomlCorpus<'a> {
    entries: &'a [QaPair],
}

/// An ordered, editable list of corpus rows, optionally backed by a file.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    path: Option<PathBuf>,
    pairs: Vec<QaPair>,
}

impl CorpusStore {
    /// An in-memory store with no backing file.
    pub fn from_pairs(pairs: Vec<QaPair>) -> Self {
        Self { path: None, pairs }
    }

    /// Load and validate a corpus file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::CorpusNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = CorpusFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let pairs = parse(&content, format)?;
        info!(path = %path.display(), rows = pairs.len(), "loaded corpus");
        Ok(Self {
            path: Some(path.to_path_buf()),
            pairs,
        })
    }

    /// Load the file if it exists, otherwise start an empty store bound to it.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        CorpusFormat::from_path(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            pairs: Vec::new(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append a row at the end of the corpus.
    pub fn push(&mut self, pair: QaPair) {
        self.pairs.push(pair);
    }

    /// Remove the row at the 0-based `index`.
    pub fn remove(&mut self, index: usize) -> Result<QaPair> {
        if index >= self.pairs.len() {
            return Err(Error::invalid_argument(format!(
                "row {} out of range (corpus has {} rows)",
                index + 1,
                self.pairs.len()
            )));
        }
        Ok(self.pairs.remove(index))
    }

    /// Write the rows back to the backing file. No-op for in-memory stores.
    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    /// Write the rows to `path`, in the format its extension names.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = match CorpusFormat::from_path(path)? {
            CorpusFormat::Json => {
                let mut s = serde_json::to_string_pretty(&self.pairs)?;
                s.push('\n');
                s
            }
            CorpusFormat::Toml => toml::to_string_pretty(&TomlCorpus {
                entries: &self.pairs,
            })?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!(path = %path.display(), rows = self.pairs.len(), "saved corpus");
        Ok(())
    }
}

/// Parse corpus text into validated rows.
///
/// A missing `question` or `answer` key fails with [`Error::Schema`]; a root
/// that is neither an array nor an object with `entries` is reported as row 0.
pub fn parse(content: &str, format: CorpusFormat) -> Result<Vec<QaPair>> {
    let root: Value = match format {
        CorpusFormat::Json => serde_json::from_str(content)?,
        CorpusFormat::Toml => {
            let table: toml::Table = toml::from_str(content)?;
            serde_json::to_value(table)?
        }
    };

    let rows = match root {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("entries") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(Error::schema(0, "entries")),
        },
        _ => return Err(Error::schema(0, "entries")),
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| parse_row(i + 1, row))
        .collect()
}

fn parse_row(row: usize, value: &Value) -> Result<QaPair> {
    let Value::Object(map) = value else {
        return Err(Error::schema(row, "question"));
    };

    let question = match map.get("question") {
        None => return Err(Error::schema(row, "question")),
        Some(v) => scalar_text(v).unwrap_or_else(|| {
            warn!(row, "question is not text; row will be skipped by the index");
            String::new()
        }),
    };

    let answer = match map.get("answer") {
        None | Some(Value::Null) => return Err(Error::schema(row, "answer")),
        Some(v) => scalar_text(v).ok_or_else(|| Error::schema(row, "answer"))?,
    };

    Ok(QaPair { question, answer })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_array() {
        let pairs = parse(
            r#"[{"question": "Как дела?", "answer": "Хорошо"}]"#,
            CorpusFormat::Json,
        )
        .unwrap();
        assert_eq!(pairs, vec![QaPair::new("Как дела?", "Хорошо")]);
    }

    #[test]
    fn test_parse_json_entries_object() {
        let pairs = parse(
            r#"{"entries": [{"question": "q", "answer": "a", "extra": 1}]}"#,
            CorpusFormat::Json,
        )
        .unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_parse_toml() {
        let toml = "[[entries]]\nquestion = \"Где ты?\"\nanswer = \"Дома\"\n";
        let pairs = parse(toml, CorpusFormat::Toml).unwrap();
        assert_eq!(pairs, vec![QaPair::new("Где ты?", "Дома")]);
    }

    #[test]
    fn test_missing_answer_is_schema_error() {
        let err = parse(
            r#"[{"question": "q", "answer": "a"}, {"question": "q2"}]"#,
            CorpusFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Schema { row: 2, field: "answer" }));
    }

    #[test]
    fn test_missing_question_is_schema_error() {
        let err = parse(r#"[{"answer": "a"}]"#, CorpusFormat::Json).unwrap_err();
        assert!(matches!(err, Error::Schema { row: 1, field: "question" }));
    }

    #[test]
    fn test_bad_root_is_schema_error() {
        let err = parse(r#"{"rows": []}"#, CorpusFormat::Json).unwrap_err();
        assert!(matches!(err, Error::Schema { row: 0, field: "entries" }));
    }

    #[test]
    fn test_non_text_question_becomes_blank() {
        let pairs = parse(
            r#"[{"question": null, "answer": "a"}, {"question": 42, "answer": 7}]"#,
            CorpusFormat::Json,
        )
        .unwrap();
        assert_eq!(pairs[0].question, "");
        assert_eq!(pairs[1], QaPair::new("42", "7"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = CorpusFormat::from_path(Path::new("faq.xlsx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CorpusStore::load("/nonexistent/faq.json").unwrap_err();
        assert!(matches!(err, Error::CorpusNotFound { .. }));
    }

    #[test]
    fn test_save_and_reload_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faq.json");
        let mut store = CorpusStore::open_or_create(&path).unwrap();
        assert!(store.is_empty());
        store.push(QaPair::new("Как дела?", "Хорошо"));
        store.push(QaPair::new("Где ты?", "Дома"));
        store.save().unwrap();

        let reloaded = CorpusStore::load(&path).unwrap();
        assert_eq!(reloaded.pairs(), store.pairs());
    }

    #[test]
    fn test_save_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faq.toml");
        let store = CorpusStore::from_pairs(vec![QaPair::new("q", "a")]);
        store.save_to(&path).unwrap();
        let reloaded = CorpusStore::load(&path).unwrap();
        assert_eq!(reloaded.pairs(), &[QaPair::new("q", "a")]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = CorpusStore::from_pairs(vec![QaPair::new("q", "a")]);
        assert!(store.remove(1).is_err());
        assert_eq!(store.remove(0).unwrap(), QaPair::new("q", "a"));
        assert!(store.is_empty());
    }
}
