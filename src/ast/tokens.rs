use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Predicates
    /// Tag predicate, from the `tag:NAME` form or a bare word
    ///
    /// Carries the tag name without the `tag:` prefix. Names are
    /// alphanumerics plus `-` and `_`.
    ///
    /// # Examples
    /// ```text
    /// tag:work
    /// urgent
    /// follow-up
    /// ```
    Tag(String),

    /// Text predicate, from a quoted string or the `text:WORD` form
    ///
    /// Carries the unescaped literal. Single and double quotes are
    /// interchangeable; backslash escapes embedded quote characters.
    ///
    /// # Examples
    /// ```text
    /// "quarterly report"
    /// 'late invoice'
    /// text:report
    /// ```
    Text(String),

    /// Completion predicate (`completed:true` / `completed:false`)
    ///
    /// The value is matched case-insensitively.
    Completed(bool),

    // Keywords
    /// Logical AND (case-insensitive keyword)
    ///
    /// # Examples
    /// ```text
    /// tag:work AND urgent
    /// ```
    And,

    /// Logical OR (case-insensitive keyword)
    ///
    /// # Examples
    /// ```text
    /// tag:work OR tag:personal
    /// ```
    Or,

    /// Logical NOT (case-insensitive keyword)
    ///
    /// # Examples
    /// ```text
    /// NOT tag:archived
    /// ```
    Not,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of query
    Eof,
}

/// Renders the token's normalized source form: keywords uppercase, tags
/// with their `tag:` prefix, text literals re-quoted.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Tag(name) => write!(f, "tag:{}", name),
            Token::Text(literal) => write!(f, "\"{}\"", literal),
            Token::Completed(value) => write!(f, "completed:{}", value),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::Not => write!(f, "NOT"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
