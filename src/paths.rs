//! Project path functions - single source of truth for file locations.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `DATABASE_PATH`: Override the corpus database file (see config.rs)
//!
//! This allows keeping several corpora side by side:
//! ```bash
//! DATA_DIR=data/hafs quran_vocab bank 2:255:3
//! DATA_DIR=data/sample quran_vocab bank 1:1:1
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite corpus database path
pub fn corpus_db_path() -> String {
    format!("{}/quran.db", data_dir())
}
