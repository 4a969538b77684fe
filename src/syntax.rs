mod expr;
mod lexer;
mod parser;
mod token;

pub use expr::{Expression, ExpressionTree};
pub use lexer::tokenize;
pub use parser::{parse, parse_str, Parser};
pub use token::{Token, TokenKind};
