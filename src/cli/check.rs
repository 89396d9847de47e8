//! Parse SimpleQL source and report the tree

use super::CliError;
use crate::{output, parse_with_config, ParserConfig};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// SimpleQL source text
    pub source: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't print the tree
    pub syntax_only: bool,
    /// Overrides `ParserConfig::max_depth`
    pub max_depth: Option<usize>,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed, with the number of root statements
    SyntaxValid(usize),
    /// JSON rendering of the parsed tree
    Success(String),
}

/// Execute a simpleql check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.source.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let mut config = ParserConfig::default();
    if let Some(max_depth) = options.max_depth {
        config.max_depth = max_depth;
    }

    let tree = parse_with_config(&options.source, config)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid(tree.len()));
    }

    let json = if options.pretty {
        output::to_json_pretty(&tree)
    } else {
        output::to_json(&tree)
    };
    Ok(CheckResult::Success(json))
}
