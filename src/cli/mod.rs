//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// faqbot - answer questions from a FAQ corpus by TF-IDF similarity.
#[derive(Parser)]
#[command(name = "faqbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Corpus file (.json or .toml); overrides the configured one
    #[arg(long, global = true, env = "FAQBOT_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format; overrides the configured one
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Minimum similarity (0.0-1.0) for an answer; overrides the configured one
    #[arg(short, long, global = true)]
    pub threshold: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Answer a question
    #[command(alias = "a")]
    Ask(AskArgs),

    /// Show the most similar stored questions with their scores
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Show corpus and index statistics
    Stats,

    /// List the stored questions
    #[command(alias = "ls")]
    List,

    /// Add a question/answer row to the corpus file
    Add(AddArgs),

    /// Remove a row (1-based) from the corpus file
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Answer questions read line by line from stdin
    Chat(ChatArgs),

    /// Print the default configuration file
    Init,
}

#[derive(Args)]
pub struct AskArgs {
    /// The question
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl AskArgs {
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Args)]
pub struct SearchArgs {
    /// The question
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Args)]
pub struct AddArgs {
    /// Question text
    #[arg(short, long)]
    pub question: String,

    /// Answer text
    #[arg(short, long)]
    pub answer: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Row number as shown by `list`
    pub row: usize,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Allow /add, /del and /reload
    #[arg(long)]
    pub admin: bool,
}

/// Output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl From<OutputFormat> for crate::output::Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
        }
    }
}
