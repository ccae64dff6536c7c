//! Run tasq queries against JSON task lists

use super::CliError;
use crate::{Query, Task};

/// Options for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// The query to run
    pub query: String,
    /// JSON task list
    pub input: Option<String>,
    /// Rank matches by relevance instead of keeping input order
    pub scored: bool,
    /// Keep at most this many results
    pub limit: Option<usize>,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a filter operation
#[derive(Debug)]
pub enum FilterResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Matching tasks (or task/score pairs) as JSON
    Matches(serde_json::Value),
}

/// Execute a tasq filter operation
pub fn execute_filter(options: &FilterOptions) -> Result<FilterResult, CliError> {
    let query = Query::parse(&options.query).map_err(CliError::Parse)?;

    if options.syntax_only {
        return Ok(FilterResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let tasks: Vec<Task> = serde_json::from_str(json_str).map_err(CliError::Json)?;

    let output = if options.scored {
        let mut hits = query.filter_scored(&tasks);
        if let Some(limit) = options.limit {
            hits.truncate(limit);
        }
        serde_json::to_value(&hits).map_err(CliError::Json)?
    } else {
        let mut matches = query.filter(&tasks);
        if let Some(limit) = options.limit {
            matches.truncate(limit);
        }
        serde_json::to_value(&matches).map_err(CliError::Json)?
    };

    Ok(FilterResult::Matches(output))
}
