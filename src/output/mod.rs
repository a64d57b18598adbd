//! Output formatters for command results.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::core::Result;
use crate::corpus::QaPair;
use crate::retrieval::{Candidate, IndexStats, Lookup};

/// Output format enum.
#[derive(Clone, Copy, Debug, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
    Markdown,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
            OutputFormat::Markdown => Format::Markdown,
        }
    }
}

/// A command result that can be rendered for humans as well as serialized.
pub trait Render: Serialize {
    fn text<W: Write>(&self, writer: &mut W) -> Result<()>;
    fn markdown<W: Write>(&self, writer: &mut W) -> Result<()>;
}

impl Format {
    pub fn write<T: Render, W: Write>(&self, report: &T, writer: &mut W) -> Result<()> {
        match self {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, report)?;
                writeln!(writer)?;
                Ok(())
            }
            Format::Markdown => report.markdown(writer),
            Format::Text => report.text(writer),
        }
    }
}

/// Result of `ask`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReport {
    pub query: String,
    pub answer: String,
    pub matched: bool,
    /// 1-based corpus row of the matched question.
    pub row: Option<usize>,
    pub question: Option<String>,
    pub score: Option<f64>,
}

impl AnswerReport {
    pub fn from_lookup(query: &str, lookup: &Lookup<'_>, fallback: &str) -> Self {
        match lookup {
            Lookup::Matched { entry, score } => Self {
                query: query.to_string(),
                answer: entry.answer.clone(),
                matched: true,
                row: Some(entry.row + 1),
                question: Some(entry.question.clone()),
                score: Some(*score),
            },
            Lookup::NoContent => Self::fallback(query, fallback, None),
            Lookup::NoConfidentMatch { best_score } => Self::fallback(query, fallback, *best_score),
        }
    }

    fn fallback(query: &str, fallback: &str, score: Option<f64>) -> Self {
        Self {
            query: query.to_string(),
            answer: fallback.to_string(),
            matched: false,
            row: None,
            question: None,
            score,
        }
    }
}

impl Render for AnswerReport {
    fn text<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.answer)?;
        Ok(())
    }

    fn markdown<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "**Q**: {}\n", self.query)?;
        writeln!(writer, "**A**: {}\n", self.answer)?;
        if let (Some(question), Some(score)) = (&self.question, self.score) {
            writeln!(writer, "_Matched \"{}\" (score {:.2})_", question, score)?;
        }
        Ok(())
    }
}

/// Result of `search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub results: Vec<Candidate>,
}

impl Render for SearchReport {
    fn text<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.results.is_empty() {
            writeln!(writer, "No similar questions found.")?;
            return Ok(());
        }
        for c in &self.results {
            writeln!(
                writer,
                "{} {} {}",
                format!("{:.3}", c.score).green(),
                format!("#{}", c.row).dimmed(),
                c.question.bold()
            )?;
            writeln!(writer, "      {}", c.answer)?;
        }
        Ok(())
    }

    fn markdown<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "# Search: {}\n", self.query)?;
        if self.results.is_empty() {
            writeln!(writer, "_No items_")?;
            return Ok(());
        }
        writeln!(writer, "| Score | Row | Question | Answer |")?;
        writeln!(writer, "|---|---|---|---|")?;
        for c in &self.results {
            writeln!(
                writer,
                "| {:.3} | {} | {} | {} |",
                c.score,
                c.row,
                escape_cell(&c.question),
                escape_cell(&c.answer)
            )?;
        }
        Ok(())
    }
}

/// Result of `stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub corpus: String,
    pub rows: usize,
    #[serde(flatten)]
    pub index: IndexStats,
}

impl Render for StatsReport {
    fn text<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "corpus:     {}", self.corpus)?;
        writeln!(writer, "rows:       {}", self.rows)?;
        writeln!(writer, "indexed:    {}", self.index.entries)?;
        writeln!(writer, "skipped:    {}", self.index.skipped)?;
        writeln!(writer, "vocabulary: {}", self.index.vocabulary)?;
        Ok(())
    }

    fn markdown<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "# Corpus {}\n", self.corpus)?;
        writeln!(writer, "**Rows**: {}\n", self.rows)?;
        writeln!(writer, "**Indexed**: {}\n", self.index.entries)?;
        writeln!(writer, "**Skipped**: {}\n", self.index.skipped)?;
        writeln!(writer, "**Vocabulary**: {}", self.index.vocabulary)?;
        Ok(())
    }
}

/// Result of `list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub entries: Vec<QaPair>,
}

impl Render for ListReport {
    fn text<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(list_text(&self.entries).as_bytes())?;
        Ok(())
    }

    fn markdown<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.entries.is_empty() {
            writeln!(writer, "_No items_")?;
            return Ok(());
        }
        writeln!(writer, "| # | Question | Answer |")?;
        writeln!(writer, "|---|---|---|")?;
        for (i, pair) in self.entries.iter().enumerate() {
            writeln!(
                writer,
                "| {} | {} | {} |",
                i + 1,
                escape_cell(&pair.question),
                escape_cell(&pair.answer)
            )?;
        }
        Ok(())
    }
}

/// Numbered `question -> answer` lines, one per row.
pub fn list_text(entries: &[QaPair]) -> String {
    if entries.is_empty() {
        return "The corpus is empty.\n".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {} -> {}\n", i + 1, p.question, p.answer))
        .collect()
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
