//! Command-line front end: argument definitions and command execution.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::QuizDefaults;
use crate::db::{self, DbPool, SqliteCorpus};
use crate::distractors::{BankOptions, DistractorGenerator, QueryError, WordCorpus};
use crate::domain::{Location, SURAH_COUNT, Strategy};
use crate::import::{self, WordLoadError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a JSON word list into the corpus database.
    Import {
        /// The path to the JSON array of words.
        path: PathBuf,
    },
    /// Print the word bank for one word as JSON.
    Bank {
        /// The word location, e.g. 2:255:3.
        #[arg(value_parser = parse_location)]
        location: String,
        /// Number of distractors (default from config.toml, else 3).
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// semantic, surah, phonetic, random, easy, length, different-surah,
        /// simple, mixed or smart.
        #[arg(short, long, value_parser = parse_strategy)]
        strategy: Option<Strategy>,
        /// Comma-separated translations that must not appear as distractors.
        #[arg(long, value_delimiter = ',')]
        avoid: Vec<String>,
    },
    /// Print one word bank per word of a verse as JSON.
    Verse {
        #[arg(value_parser = clap::value_parser!(u16).range(1..=i64::from(SURAH_COUNT)))]
        surah: u16,
        verse: u32,
        /// Number of distractors per word.
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

fn parse_location(s: &str) -> Result<String, String> {
    match Location::parse(s) {
        Some(location) => Ok(location.to_string()),
        None => Err(format!("'{}' is not a surah:verse:position location", s)),
    }
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    Strategy::from_str(s).ok_or_else(|| format!("unknown strategy '{}'", s))
}

#[derive(Debug)]
pub enum CliError {
    NotFound(String),
    Load(WordLoadError),
    Query(QueryError),
    Database(rusqlite::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NotFound(e) => write!(f, "Not found: {}", e),
            CliError::Load(e) => write!(f, "{}", e),
            CliError::Query(e) => write!(f, "{}", e),
            CliError::Database(e) => write!(f, "Database error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<WordLoadError> for CliError {
    fn from(e: WordLoadError) -> Self {
        CliError::Load(e)
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<rusqlite::Error> for CliError {
    fn from(e: rusqlite::Error) -> Self {
        CliError::Database(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

/// Execute a command against the corpus database, returning text to print
pub fn run(command: Command, pool: DbPool, defaults: QuizDefaults) -> Result<String, CliError> {
    match command {
        Command::Import { path } => {
            let conn = db::try_lock(&pool).map_err(QueryError::from)?;
            let inserted = import::import_words_file(&conn, &path)?;
            let total = db::count_words(&conn)?;
            Ok(format!("Imported {} words ({} in corpus)", inserted, total))
        }
        Command::Bank {
            location,
            count,
            strategy,
            avoid,
        } => {
            let corpus = SqliteCorpus::new(pool);
            let word = corpus
                .find_by_location(&location)?
                .ok_or_else(|| CliError::NotFound(format!("word {}", location)))?;

            let mut generator = DistractorGenerator::new(corpus);
            let bank = generator.generate_word_bank_with(
                &word,
                count.unwrap_or(defaults.distractor_count),
                strategy.unwrap_or(defaults.strategy),
                &BankOptions::avoiding(avoid),
            );
            Ok(serde_json::to_string_pretty(&bank)?)
        }
        Command::Verse {
            surah,
            verse,
            count,
        } => {
            let corpus = SqliteCorpus::new(pool);
            let words = corpus.query_by_verse(surah, verse)?;
            if words.is_empty() {
                return Err(CliError::NotFound(format!("verse {}:{}", surah, verse)));
            }

            let mut generator = DistractorGenerator::new(corpus);
            let banks =
                generator.verse_word_banks(&words, count.unwrap_or(defaults.distractor_count));
            Ok(serde_json::to_string_pretty(&banks)?)
        }
    }
}
