pub mod cli;
pub mod config;
pub mod db;
pub mod distractors;
pub mod domain;
pub mod import;
pub mod paths;

#[cfg(test)]
pub(crate) mod testing;
