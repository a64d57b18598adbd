//! faqbot CLI - answer questions from a FAQ corpus.

use std::io::{stdin, stdout};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use faqbot::chat::ChatSession;
use faqbot::cli::{Cli, Command};
use faqbot::config::Config;
use faqbot::core::{Error, Result};
use faqbot::corpus::{CorpusStore, QaPair};
use faqbot::output::{AnswerReport, Format, ListReport, SearchReport, StatsReport};
use faqbot::retrieval::{validate_threshold, RetrievalEngine, SharedEngine};

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only answers.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    };
    if let Some(corpus) = &cli.corpus {
        config.corpus = corpus.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.retrieval.threshold = validate_threshold(threshold)?;
    }
    let format = cli.format.map(Format::from).unwrap_or(config.output.format.into());
    let mut out = stdout();

    match cli.command {
        Command::Init => {
            print!("{}", Config::default_toml());
        }
        Command::Ask(args) => {
            let engine = build_engine(&config, &CorpusStore::load(&config.corpus)?);
            let query = args.query();
            let lookup = engine.lookup(&query, config.retrieval.threshold);
            let report = AnswerReport::from_lookup(&query, &lookup, engine.fallback_message());
            format.write(&report, &mut out)?;
        }
        Command::Search(args) => {
            let engine = build_engine(&config, &CorpusStore::load(&config.corpus)?);
            let query = args.query();
            let top_k = args.limit.unwrap_or(config.retrieval.top_k);
            let results = engine.search(&query, top_k);
            format.write(&SearchReport { query, results }, &mut out)?;
        }
        Command::Stats => {
            let store = CorpusStore::load(&config.corpus)?;
            let engine = build_engine(&config, &store);
            let report = StatsReport {
                corpus: config.corpus.display().to_string(),
                rows: store.len(),
                index: engine.stats(),
            };
            format.write(&report, &mut out)?;
        }
        Command::List => {
            let store = CorpusStore::load(&config.corpus)?;
            let report = ListReport {
                entries: store.pairs().to_vec(),
            };
            format.write(&report, &mut out)?;
        }
        Command::Add(args) => {
            let (question, answer) = (args.question.trim(), args.answer.trim());
            if question.is_empty() || answer.is_empty() {
                return Err(Error::invalid_argument(
                    "question and answer must not be blank",
                ));
            }
            let mut store = CorpusStore::open_or_create(&config.corpus)?;
            store.push(QaPair::new(question, answer));
            store.save()?;
            println!("Added #{} to {}", store.len(), config.corpus.display());
        }
        Command::Remove(args) => {
            let mut store = CorpusStore::load(&config.corpus)?;
            let index = args
                .row
                .checked_sub(1)
                .ok_or_else(|| Error::invalid_argument("rows are numbered from 1"))?;
            let removed = store.remove(index)?;
            store.save()?;
            println!("Removed #{}: {}", args.row, removed.question);
        }
        Command::Chat(args) => {
            let store = CorpusStore::load(&config.corpus)?;
            let shared = SharedEngine::new(build_engine(&config, &store));
            let mut session =
                ChatSession::new(&shared, store, config.retrieval.threshold).with_admin(args.admin);
            session.run(stdin().lock(), &mut out)?;
        }
    }

    Ok(())
}

fn build_engine(config: &Config, store: &CorpusStore) -> RetrievalEngine {
    RetrievalEngine::build(store.pairs(), config.engine_options())
}
