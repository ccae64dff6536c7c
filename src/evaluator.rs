use serde::Serialize;

use crate::{
    ast::Expr,
    lexer::Lexer,
    parser::{ParseError, Parser},
    task::Task,
};

/// Score contributed by a matching tag predicate.
///
/// Tag and completion predicates outweigh text predicates so that exact
/// matches rank above loose substring hits.
pub const TAG_WEIGHT: f64 = 2.0;

/// Score contributed by a matching completion predicate.
pub const COMPLETED_WEIGHT: f64 = 2.0;

/// Score contributed by a matching text predicate.
pub const TEXT_WEIGHT: f64 = 1.0;

/// A parsed, ready-to-run query.
///
/// Parsing and evaluation are pure: a `Query` holds only the expression
/// tree, never a reference to any task collection, so one instance can
/// be run against any number of snapshots (and from multiple threads).
///
/// # Examples
///
/// ```
/// use tasq_lang::{Query, Task};
///
/// let query = Query::parse("tag:work AND NOT completed:true").unwrap();
///
/// let open = Task::new("Ship the report").with_tag("work");
/// let done = Task::new("File expenses").with_tag("work").with_completed(true);
///
/// assert!(query.matches(&open));
/// assert!(!query.matches(&done));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    expr: Expr,
}

impl Query {
    /// Parses a query string.
    ///
    /// Fails with the lexer's or parser's [`ParseError`]; an empty or
    /// whitespace-only query is an error, not a match-all.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parser = Parser::new(Lexer::new(input))?;
        Ok(Query {
            expr: parser.parse()?,
        })
    }

    /// Root of the parsed expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// True when the task satisfies the query.
    pub fn matches(&self, task: &Task) -> bool {
        evaluate(&self.expr, task)
    }

    /// Relevance score for a matching task, `None` when it does not
    /// match.
    ///
    /// A matching task never scores lower than one matching fewer or
    /// weaker predicates under the same expression.
    pub fn score(&self, task: &Task) -> Option<f64> {
        let (matched, score) = score_expr(&self.expr, task);
        matched.then_some(score)
    }

    /// All matching tasks, in snapshot order.
    pub fn filter<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    /// All matching tasks with their scores, best first.
    ///
    /// The sort is stable, so equal scores keep snapshot order.
    pub fn filter_scored<'a>(&self, tasks: &'a [Task]) -> Vec<ScoredTask<'a>> {
        let mut hits: Vec<ScoredTask<'a>> = tasks
            .iter()
            .filter_map(|task| self.score(task).map(|score| ScoredTask { task, score }))
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits
    }
}

/// A matching task together with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredTask<'a> {
    pub task: &'a Task,
    pub score: f64,
}

/// Evaluates an expression against a single task.
pub fn evaluate(expr: &Expr, task: &Task) -> bool {
    match expr {
        Expr::Tag(name) => task.has_tag(name),
        Expr::Text(literal) => text_matches(literal, task),
        Expr::Completed(want) => task.completed == *want,
        Expr::And(left, right) => evaluate(left, task) && evaluate(right, task),
        Expr::Or(left, right) => evaluate(left, task) || evaluate(right, task),
        Expr::Not(operand) => !evaluate(operand, task),
    }
}

/// Match flag plus accumulated score. Non-matching subtrees always carry
/// a zero score, so `Or` can sum both sides unconditionally.
fn score_expr(expr: &Expr, task: &Task) -> (bool, f64) {
    match expr {
        Expr::Tag(name) => weighted(task.has_tag(name), TAG_WEIGHT),
        Expr::Text(literal) => weighted(text_matches(literal, task), TEXT_WEIGHT),
        Expr::Completed(want) => weighted(task.completed == *want, COMPLETED_WEIGHT),
        Expr::And(left, right) => {
            let (left_match, left_score) = score_expr(left, task);
            let (right_match, right_score) = score_expr(right, task);
            if left_match && right_match {
                (true, left_score + right_score)
            } else {
                (false, 0.0)
            }
        }
        Expr::Or(left, right) => {
            let (left_match, left_score) = score_expr(left, task);
            let (right_match, right_score) = score_expr(right, task);
            (left_match || right_match, left_score + right_score)
        }
        Expr::Not(operand) => {
            // Negation gates; it never adds to the score
            let (matched, _) = score_expr(operand, task);
            (!matched, 0.0)
        }
    }
}

fn weighted(matched: bool, weight: f64) -> (bool, f64) {
    (matched, if matched { weight } else { 0.0 })
}

fn text_matches(literal: &str, task: &Task) -> bool {
    let needle = literal.to_lowercase();
    task.text.to_lowercase().contains(&needle)
        || task.tags.iter().any(|tag| tag.to_lowercase() == needle)
}

/// Parses and runs a query over a task snapshot.
///
/// Matches come back in snapshot order, truncated to `limit` when one
/// is given. The snapshot is never mutated and nothing is retained past
/// the call.
///
/// # Examples
///
/// ```
/// use tasq_lang::{execute, Task};
///
/// let tasks = vec![
///     Task::new("Ship the report").with_tag("work"),
///     Task::new("Water the plants").with_tag("home"),
/// ];
///
/// let matches = execute("tag:work", &tasks, None).unwrap();
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].text, "Ship the report");
/// ```
pub fn execute<'a>(
    query: &str,
    tasks: &'a [Task],
    limit: Option<usize>,
) -> Result<Vec<&'a Task>, ParseError> {
    let parsed = Query::parse(query)?;
    let mut matches = parsed.filter(tasks);
    if let Some(limit) = limit {
        matches.truncate(limit);
    }
    Ok(matches)
}

/// Parses and runs a query, ranking matches by relevance.
///
/// Results are ordered score-descending; equal scores keep snapshot
/// order. `limit` truncates after ranking.
pub fn execute_scored<'a>(
    query: &str,
    tasks: &'a [Task],
    limit: Option<usize>,
) -> Result<Vec<ScoredTask<'a>>, ParseError> {
    let parsed = Query::parse(query)?;
    let mut hits = parsed.filter_scored(tasks);
    if let Some(limit) = limit {
        hits.truncate(limit);
    }
    Ok(hits)
}
