/// Abstract Syntax Tree node representing a parsed query expression.
///
/// The AST is the internal representation of a query after parsing.
/// Leaf nodes are predicates over a single task; inner nodes combine
/// them with boolean operators. Evaluation is a single exhaustive match
/// over this enum, so adding a node kind is a compile-time checklist.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Predicates
    /// Tag membership
    ///
    /// Matches when the task carries the tag, compared case-sensitively.
    ///
    /// # Example
    /// ```text
    /// tag:work
    /// ```
    Tag(String),

    /// Free-text match
    ///
    /// Matches when the literal occurs in the task text
    /// (case-insensitive substring) or equals one of the task's tags
    /// (case-insensitive).
    ///
    /// # Example
    /// ```text
    /// "quarterly report"
    /// ```
    Text(String),

    /// Completion flag match
    ///
    /// # Example
    /// ```text
    /// completed:false
    /// ```
    Completed(bool),

    // Operators
    /// Logical conjunction
    And(Box<Expr>, Box<Expr>),

    /// Logical disjunction
    Or(Box<Expr>, Box<Expr>),

    /// Logical negation
    Not(Box<Expr>),
}
