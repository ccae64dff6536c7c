use crate::{
    ast::{Expr, Token},
    lexer::{LexError, Lexer},
};
use std::fmt;
use std::mem;

/// Maximum `(`/`NOT` nesting depth accepted by the parser.
///
/// Deeper queries fail with [`SyntaxError::NestingTooDeep`] instead of
/// recursing without bound.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Grammar violations found while parsing a token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// Query contained no tokens at all
    EmptyQuery,

    /// Operator or end of input where an atom was expected
    UnexpectedToken(Token),

    /// `(` without a matching `)`
    MissingRParen,

    /// Complete expression followed by more tokens
    TrailingToken(Token),

    /// Nesting beyond [`MAX_NESTING_DEPTH`]
    NestingTooDeep,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::EmptyQuery => write!(f, "empty query"),
            SyntaxError::UnexpectedToken(token) => write!(f, "unexpected token: {}", token),
            SyntaxError::MissingRParen => write!(f, "missing )"),
            SyntaxError::TrailingToken(token) => {
                write!(f, "unexpected trailing token: {}", token)
            }
            SyntaxError::NestingTooDeep => {
                write!(f, "query nested deeper than {} levels", MAX_NESTING_DEPTH)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Errors that can occur while turning a query string into an AST.
///
/// Both kinds stay inspectable so callers can distinguish a bad
/// character from a bad grammar shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The lexer could not classify part of the input
    Lex(LexError),

    /// The token stream violated the grammar
    Syntax(SyntaxError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Syntax(e) => Some(e),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(e: SyntaxError) -> Self {
        ParseError::Syntax(e)
    }
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn at_atom_start(&self) -> bool {
        matches!(
            self.current_token,
            Token::Tag(_) | Token::Text(_) | Token::Completed(_) | Token::Not | Token::LParen
        )
    }

    fn enter_nested(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(SyntaxError::NestingTooDeep.into());
        }
        Ok(())
    }

    /// Parses a complete query expression.
    ///
    /// Succeeds only when the whole token stream is consumed: leftover
    /// tokens after a well-formed expression are an error, as is an
    /// empty stream.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Eof) {
            return Err(SyntaxError::EmptyQuery.into());
        }

        let expr = self.parse_or()?;

        if !self.check(&Token::Eof) {
            return Err(SyntaxError::TrailingToken(self.current_token.clone()).into());
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance()?;
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;

        loop {
            if self.check(&Token::And) {
                self.advance()?;
            } else if !self.at_atom_start() {
                break;
            }
            // Adjacent atoms conjoin without an explicit AND
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Not) {
            self.advance()?;
            self.enter_nested()?;
            let operand = self.parse_not()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Tag(name) => {
                self.advance()?;
                Ok(Expr::Tag(name))
            }
            Token::Text(literal) => {
                self.advance()?;
                Ok(Expr::Text(literal))
            }
            Token::Completed(value) => {
                self.advance()?;
                Ok(Expr::Completed(value))
            }
            Token::LParen => {
                self.advance()?;
                self.enter_nested()?;
                let expr = self.parse_or()?;
                self.depth -= 1;

                if !self.check(&Token::RParen) {
                    return Err(SyntaxError::MissingRParen.into());
                }
                self.advance()?;
                Ok(expr)
            }
            token => Err(SyntaxError::UnexpectedToken(token).into()),
        }
    }
}

/// Parses a query string into an AST in one step.
pub fn parse_query(input: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}
