//! # calk
//!
//! Evaluates arithmetic expressions such as `1/2 - (4 - cos(10+2))`.
//!
//! Text goes through three stages, each usable on its own:
//! [`tokenize`] turns it into [`Token`]s, [`parse`] builds an [`ExpressionTree`],
//! and [`evaluate`] walks the tree to an `f64`. [`evaluate_str`] runs all three.
//!
//! ```
//! use calk::{evaluate_str, Config};
//!
//! let value = evaluate_str("2^3 - sqrt(16)", &Config::default()).unwrap();
//! assert_eq!(value, Some(4.0));
//!
//! let degrees = Config::new().with_degrees(true);
//! let value = evaluate_str("2 * sin(90)", &degrees).unwrap().unwrap();
//! assert!((value - 2.0).abs() < 1e-12);
//! ```

mod config;
mod error;
mod runtime;
mod syntax;

pub use config::{Config, DEFAULT_MAX_DEPTH, DEFAULT_MAX_HEIGHT};
pub use error::{EResult, Error, EvalError, LResult, LexError, PResult, ParseError};
pub use runtime::{
    eval::{evaluate, evaluate_str, Evaluator},
    SUPPORTED_FUNCTIONS,
};
pub use syntax::{parse, parse_str, tokenize, Expression, ExpressionTree, Parser, Token, TokenKind};
