use log::debug;

use super::builtin;
use crate::{
    config::Config,
    error::{EResult, Error, EvalError},
    syntax::{parse_str, Expression, ExpressionTree, TokenKind},
};

/// Tree-walking evaluator over `f64`.
///
/// Arithmetic follows IEEE-754: `5/0` is `inf`, `sqrt(-1)` is `NaN`. The only failures are
/// unknown or unapplied function names and trees taller than `max_height`. Trees from the
/// parser never exceed it; the check covers trees built by hand.
pub struct Evaluator {
    use_degrees: bool,
    max_height: usize,
}

impl Evaluator {
    pub fn new(config: &Config) -> Self {
        Self {
            use_degrees: config.use_degrees,
            max_height: config.max_height,
        }
    }

    pub fn eval_tree(&self, tree: &ExpressionTree) -> EResult<Option<f64>> {
        tree.root().map(|root| self.eval(root)).transpose()
    }

    pub fn eval(&self, expr: &Expression) -> EResult<f64> {
        self.eval_expr(expr, 1)
    }

    fn eval_expr(&self, expr: &Expression, depth: usize) -> EResult<f64> {
        if depth > self.max_height {
            return Err(EvalError::TooDeep {
                limit: self.max_height,
            });
        }

        match expr {
            Expression::Number(token) => Ok(token
                .value
                .parse::<f64>()
                .unwrap_or_else(|_| panic!("Lexer produced a malformed numeral `{}`", token.value))),
            Expression::Binary { op, lhs, rhs } => {
                let lhs = self.eval_expr(lhs, depth + 1)?;
                let rhs = self.eval_expr(rhs, depth + 1)?;

                match op.kind {
                    TokenKind::AddOp => Ok(lhs + rhs),
                    TokenKind::MinusOp => Ok(lhs - rhs),
                    TokenKind::MultOp => Ok(lhs * rhs),
                    TokenKind::DivOp => Ok(lhs / rhs),
                    TokenKind::ExpOp => Ok(lhs.powf(rhs)),
                    other => unreachable!("`{other}` is not a binary operator"),
                }
            }
            Expression::Call { name, arg } => {
                let func = builtin::lookup(name.value)
                    .ok_or_else(|| EvalError::UnsupportedFunction(name.value.to_string()))?;
                let arg = self.eval_expr(arg, depth + 1)?;
                Ok(func.apply(arg, self.use_degrees))
            }
            Expression::Function(name) => match builtin::lookup(name.value) {
                Some(_) => Err(EvalError::MissingArgument(name.value.to_string())),
                None => Err(EvalError::UnsupportedFunction(name.value.to_string())),
            },
        }
    }
}

/// Evaluates `root`, converting forward trig arguments from degrees when `use_degrees` is set.
pub fn evaluate(root: &Expression, use_degrees: bool) -> EResult<f64> {
    Evaluator::new(&Config::default().with_degrees(use_degrees)).eval(root)
}

/// Runs the whole pipeline on `src`. Empty input evaluates to `None`.
pub fn evaluate_str(src: &str, config: &Config) -> Result<Option<f64>, Error> {
    let tree = parse_str(src, config)?;
    let value = Evaluator::new(config).eval_tree(&tree)?;
    debug!("evaluated {src:?} to {value:?}");
    Ok(value)
}
