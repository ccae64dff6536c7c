pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod task;

pub use ast::{Expr, Token};
pub use evaluator::{evaluate, execute, execute_scored, Query, ScoredTask};
pub use lexer::{tokenize, LexError, Lexer};
pub use parser::{parse_query, ParseError, Parser, SyntaxError};
pub use task::Task;
