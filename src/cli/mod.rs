//! CLI support for simpleql
//!
//! Provides programmatic access to the `simpleql` binary's commands so other
//! tools can embed them.

mod check;
mod docs;

pub use check::{execute_check, CheckOptions, CheckResult};
pub use docs::{get_doc_category, get_docs_overview, DocCategory};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Pass SimpleQL source, use --file, or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'simpleql docs' to see available categories.")]
    UnknownCategory(String),
}
