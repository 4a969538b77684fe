use std::fmt::{self, Write};

use super::token::Token;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Expression<'src> {
    Number(Token<'src>),
    /// A function name that was not applied to an argument.
    Function(Token<'src>),
    Binary {
        op: Token<'src>,
        lhs: Box<Expression<'src>>,
        rhs: Box<Expression<'src>>,
    },
    Call {
        name: Token<'src>,
        arg: Box<Expression<'src>>,
    },
}

impl<'src> Expression<'src> {
    pub fn token(&self) -> &Token<'src> {
        match self {
            Self::Number(token) | Self::Function(token) => token,
            Self::Binary { op, .. } => op,
            Self::Call { name, .. } => name,
        }
    }

    /// The call argument takes the left slot, so `sin(x)` renders like the node `sin` over `x`.
    fn children(&self) -> (Option<&Expression<'src>>, Option<&Expression<'src>>) {
        match self {
            Self::Number(_) | Self::Function(_) => (None, None),
            Self::Binary { lhs, rhs, .. } => (Some(&**lhs), Some(&**rhs)),
            Self::Call { arg, .. } => (Some(&**arg), None),
        }
    }

    fn render_into(&self, out: &mut String, indent: &str, is_tail: bool) -> fmt::Result {
        let (left, right) = self.children();

        if let Some(right) = right {
            right.render_into(out, &format!("{indent}│   "), false)?;
        }

        let connector = if is_tail { "└── " } else { "├── " };
        writeln!(out, "{indent}{connector}{}", self.token())?;

        if let Some(left) = left {
            left.render_into(out, &format!("{indent}    "), true)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum ExpressionTree<'src> {
    #[default]
    Empty,
    Root(Expression<'src>),
}

impl<'src> ExpressionTree<'src> {
    pub fn root(&self) -> Option<&Expression<'src>> {
        match self {
            Self::Empty => None,
            Self::Root(root) => Some(root),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Sideways dump of the tree: right subtrees above their parent, left subtrees below.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Self::Root(root) = self {
            // Writing into a `String` cannot fail.
            let _ = root.render_into(&mut out, "", true);
        }
        out
    }
}

impl fmt::Display for ExpressionTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
