use std::fmt;

use crate::syntax::TokenKind;

/// No recognition rule matched at `position`, a character offset into the input.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LexError {
    pub position: usize,
    pub offending: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown token `{}` at position {}",
            self.offending,
            self.position + 1
        )
    }
}

impl std::error::Error for LexError {}

/// Every `position` is a character offset into the input, or its length at end of input.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// `consume` found something other than the expected kind. `found` is `None` at end of input.
    Expected {
        position: usize,
        expected: TokenKind,
        found: Option<String>,
    },
    UnexpectedToken {
        position: usize,
        found: String,
    },
    UnexpectedEnd {
        position: usize,
    },
    TrailingInput {
        position: usize,
        found: String,
    },
    /// Parentheses and calls nested more than `limit` levels.
    TooDeep {
        position: usize,
        limit: usize,
    },
    /// The tree would grow taller than `limit`, e.g. from a very long operator chain.
    TooTall {
        position: usize,
        limit: usize,
    },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            Self::Expected { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEnd { position }
            | Self::TrailingInput { position, .. }
            | Self::TooDeep { position, .. }
            | Self::TooTall { position, .. } => *position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected {
                position,
                expected,
                found: Some(found),
            } => write!(
                f,
                "Expected {expected}, found `{found}` at position {}",
                position + 1
            ),
            Self::Expected {
                position,
                expected,
                found: None,
            } => write!(
                f,
                "Expected {expected}, found end of input at position {}",
                position + 1
            ),
            Self::UnexpectedToken { position, found } => write!(
                f,
                "Expected expression, found `{found}` at position {}",
                position + 1
            ),
            Self::UnexpectedEnd { position } => write!(
                f,
                "Expected expression, found end of input at position {}",
                position + 1
            ),
            Self::TrailingInput { position, found } => write!(
                f,
                "Unexpected `{found}` after expression at position {}",
                position + 1
            ),
            Self::TooDeep { position, limit } => write!(
                f,
                "Expression is nested too deeply (limit {limit}) at position {}",
                position + 1
            ),
            Self::TooTall { position, limit } => write!(
                f,
                "Expression is too long to evaluate (tree height limit {limit}) at position {}",
                position + 1
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum EvalError {
    UnsupportedFunction(String),
    MissingArgument(String),
    TooDeep { limit: usize },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFunction(name) => write!(f, "Unsupported function `{name}`"),
            Self::MissingArgument(name) => {
                write!(f, "Function `{name}` must be called with an argument")
            }
            Self::TooDeep { limit } => {
                write!(f, "Expression is nested too deeply (limit {limit})")
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Any failure of the tokenize → parse → evaluate pipeline.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
}

impl Error {
    /// Offset into the source text to mark with `^`, if the failing stage knows one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lex(err) => Some(err.position),
            Self::Parse(err) => Some(err.position()),
            Self::Eval(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => write!(f, "Invalid syntax: {err}"),
            Self::Parse(err) => write!(f, "Unable to parse expression: {err}"),
            Self::Eval(err) => write!(f, "Evaluation failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Eval(err) => Some(err),
        }
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Self::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        Self::Eval(err)
    }
}

pub type LResult<T> = Result<T, LexError>;
pub type PResult<T> = Result<T, ParseError>;
pub type EResult<T> = Result<T, EvalError>;
