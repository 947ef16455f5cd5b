pub mod strategy;
pub mod word;

pub use strategy::{Difficulty, Strategy};
pub use word::{BankEntry, Location, SURAH_COUNT, Verse, Word, WordBank, WordError};
