use crate::ast::Token;
use std::fmt;

/// Errors produced while tokenizing a query string.
///
/// Positions are character offsets into the query.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Character that cannot start any token
    UnexpectedChar { ch: char, position: usize },

    /// `tag:`, `text:` or `completed:` with nothing after the colon
    MissingValue { key: String, position: usize },

    /// Tag name containing characters outside alphanumerics, `-`, `_`
    InvalidTagName { name: String, position: usize },

    /// `key:value` predicate with an unsupported key
    UnknownField { key: String, position: usize },

    /// `completed:` with a value other than true/false
    InvalidCompletedValue { value: String, position: usize },

    /// Quoted string with no closing quote
    UnterminatedString { position: usize },

    /// Unsupported backslash escape inside a quoted string
    InvalidEscape { ch: char, position: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, position } => {
                write!(f, "unexpected character '{}' at position {}", ch, position)
            }
            LexError::MissingValue { key, position } => {
                write!(f, "missing value after '{}:' at position {}", key, position)
            }
            LexError::InvalidTagName { name, position } => {
                write!(f, "invalid tag name '{}' at position {}", name, position)
            }
            LexError::UnknownField { key, position } => {
                write!(f, "unknown field '{}' at position {}", key, position)
            }
            LexError::InvalidCompletedValue { value, position } => {
                write!(
                    f,
                    "invalid completed value '{}' at position {} (expected true or false)",
                    value, position
                )
            }
            LexError::UnterminatedString { position } => {
                write!(f, "unterminated string starting at position {}", position)
            }
            LexError::InvalidEscape { ch, position } => {
                write!(f, "invalid escape sequence '\\{}' at position {}", ch, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_name_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '-'
    }

    /// Reads a run of name characters plus `:`, so `tag:work` and
    /// `completed:true` arrive as a single unit.
    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_name_char(ch) || ch == ':' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(LexError::InvalidEscape {
                                ch,
                                position: self.position,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    /// Classifies an identifier run: keyword, `key:value` predicate, or
    /// bare tag name.
    fn classify_identifier(&self, ident: String, start: usize) -> Result<Token, LexError> {
        if let Some((key, value)) = ident.split_once(':') {
            return self.classify_field(key, value, start);
        }

        match ident.to_ascii_uppercase().as_str() {
            "AND" => Ok(Token::And),
            "OR" => Ok(Token::Or),
            "NOT" => Ok(Token::Not),
            _ => Ok(Token::Tag(ident)),
        }
    }

    fn classify_field(&self, key: &str, value: &str, start: usize) -> Result<Token, LexError> {
        let key_lower = key.to_ascii_lowercase();
        if value.is_empty() {
            return Err(LexError::MissingValue {
                key: key_lower,
                position: start,
            });
        }

        match key_lower.as_str() {
            "tag" => {
                if value.chars().all(Self::is_name_char) {
                    Ok(Token::Tag(value.to_string()))
                } else {
                    Err(LexError::InvalidTagName {
                        name: value.to_string(),
                        position: start,
                    })
                }
            }
            "text" => Ok(Token::Text(value.to_string())),
            "completed" => {
                if value.eq_ignore_ascii_case("true") {
                    Ok(Token::Completed(true))
                } else if value.eq_ignore_ascii_case("false") {
                    Ok(Token::Completed(false))
                } else {
                    Err(LexError::InvalidCompletedValue {
                        value: value.to_string(),
                        position: start,
                    })
                }
            }
            _ => Err(LexError::UnknownField {
                key: key_lower,
                position: start,
            }),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some('"') => Ok(Token::Text(self.read_string('"')?)),
            Some('\'') => Ok(Token::Text(self.read_string('\'')?)),
            Some(ch) if Self::is_name_char(ch) => {
                let start = self.position;
                let ident = self.read_identifier();
                self.classify_identifier(ident, start)
            }
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position,
            }),
        }
    }
}

/// Tokenizes a whole query, ending the sequence with exactly one
/// [`Token::Eof`].
pub fn tokenize(query: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(query);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("AND or Not");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Not);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_tags_and_parens() {
    let mut lexer = Lexer::new("(tag:work urgent)");
    assert_eq!(lexer.next_token().unwrap(), Token::LParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Tag("work".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Tag("urgent".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RParen);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
