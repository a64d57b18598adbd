//! Line-oriented chat session over a shared engine.
//!
//! Plain lines are questions. Lines starting with `/` are commands; the ones
//! that change the corpus need admin rights and end with a rebuild and swap of
//! the shared engine.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::core::{Error, Result};
use crate::corpus::{CorpusStore, QaPair};
use crate::output::list_text;
use crate::retrieval::SharedEngine;

const HELP: &str = "\
Ask any question, or use a command:
  /help                       show this message
  /list                       list stored questions
  /add <question> | <answer>  add a question (admin)
  /del <n>                    delete question number n (admin)
  /reload                     re-read the corpus file (admin)";

const ADMIN_ONLY: &str = "This command is available to administrators only.";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    Help,
    List,
    Add(QaPair),
    Delete(usize),
    Reload,
}

impl Command {
    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Self::Ask(line.to_string())));
        };
        let (name, args) = rest
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((rest, ""));

        let command = match name {
            "help" | "start" => Self::Help,
            "list" => Self::List,
            "reload" => Self::Reload,
            "add" => {
                let (question, answer) = args
                    .split_once('|')
                    .map(|(q, a)| (q.trim(), a.trim()))
                    .filter(|(q, a)| !q.is_empty() && !a.is_empty())
                    .ok_or_else(|| Error::invalid_argument("usage: /add <question> | <answer>"))?;
                Self::Add(QaPair::new(question, answer))
            }
            "del" | "delete" => {
                let n = args
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| Error::invalid_argument("usage: /del <n>"))?;
                Self::Delete(n)
            }
            other => {
                return Err(Error::invalid_argument(format!(
                    "unknown command /{other}; try /help"
                )))
            }
        };
        Ok(Some(command))
    }

    fn is_mutating(&self) -> bool {
        matches!(self, Self::Add(_) | Self::Delete(_) | Self::Reload)
    }
}

/// A chat session bound to a shared engine and the corpus it was built from.
pub struct ChatSession<'a> {
    engine: &'a SharedEngine,
    store: CorpusStore,
    threshold: f64,
    admin: bool,
}

impl<'a> ChatSession<'a> {
    pub fn new(engine: &'a SharedEngine, store: CorpusStore, threshold: f64) -> Self {
        Self {
            engine,
            store,
            threshold,
            admin: false,
        }
    }

    /// Allow commands that change the corpus.
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// Reply to one line, or `None` for a blank line. Parse and command
    /// errors are returned as the reply text.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let reply = match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => return None,
            Err(e) => Err(e),
        };
        match reply {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(error = %e, "chat command failed");
                Some(format!("Error: {e}"))
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<String> {
        if command.is_mutating() && !self.admin {
            return Ok(ADMIN_ONLY.to_string());
        }
        match command {
            Command::Ask(query) => Ok(self
                .engine
                .snapshot()
                .find_best_answer(&query, self.threshold)
                .to_string()),
            Command::Help => Ok(HELP.to_string()),
            Command::List => Ok(list_text(self.store.pairs()).trim_end().to_string()),
            Command::Add(pair) => {
                let question = pair.question.clone();
                let mut store = self.store.clone();
                store.push(pair);
                self.commit(store)?;
                Ok(format!("Added #{}: {}", self.store.len(), question))
            }
            Command::Delete(n) => {
                let mut store = self.store.clone();
                let removed = store.remove(n - 1)?;
                self.commit(store)?;
                Ok(format!("Deleted #{}: {}", n, removed.question))
            }
            Command::Reload => {
                let Some(path) = self.store.path().map(|p| p.to_path_buf()) else {
                    return Ok("No corpus file is attached to this session.".to_string());
                };
                self.store = CorpusStore::load(&path)?;
                self.engine.rebuild(self.store.pairs());
                Ok(format!("Reloaded {} questions.", self.store.len()))
            }
        }
    }

    /// Save `store`, then publish it. On error the session keeps its
    /// previous rows and engine.
    fn commit(&mut self, store: CorpusStore) -> Result<()> {
        store.save()?;
        self.engine.rebuild(store.pairs());
        self.store = store;
        Ok(())
    }

    /// Answer lines from `reader` until end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, writer: &mut W) -> Result<()> {
        info!(admin = self.admin, threshold = self.threshold, "chat session started");
        for line in reader.lines() {
            let line = line?;
            if let Some(reply) = self.handle_line(&line) {
                writeln!(writer, "{reply}")?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}
