use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    AddOp,
    MinusOp,
    MultOp,
    DivOp,
    ExpOp,
    LeftParen,
    RightParen,
    FunctionName,
}

impl TokenKind {
    /// Tokens after which a `-` directly followed by digits is a sign, not a subtraction.
    pub fn expects_operand(self) -> bool {
        matches!(
            self,
            Self::AddOp | Self::MinusOp | Self::MultOp | Self::DivOp | Self::ExpOp | Self::LeftParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Number => "number",
            Self::AddOp => "`+`",
            Self::MinusOp => "`-`",
            Self::MultOp => "`*`",
            Self::DivOp => "`/`",
            Self::ExpOp => "`^`",
            Self::LeftParen => "`(`",
            Self::RightParen => "`)`",
            Self::FunctionName => "function name",
        };
        f.write_str(s)
    }
}

/// A classified slice of the input. `offset` is the byte offset of `value` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub value: &'src str,
    pub kind: TokenKind,
    pub offset: usize,
}

impl<'src> Token<'src> {
    pub fn new(value: &'src str, kind: TokenKind, offset: usize) -> Self {
        Self {
            value,
            kind,
            offset,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.value)
    }
}

#[cfg(test)]
mod test {
    use super::{Token, TokenKind};

    #[test]
    fn display() {
        assert_eq!(Token::new("sqrt", TokenKind::FunctionName, 0).to_string(), "[sqrt]");
        assert_eq!(TokenKind::RightParen.to_string(), "`)`");
    }

    #[test]
    fn sign_positions() {
        assert!(TokenKind::LeftParen.expects_operand());
        assert!(TokenKind::ExpOp.expects_operand());
        assert!(!TokenKind::Number.expects_operand());
        assert!(!TokenKind::RightParen.expects_operand());
        assert!(!TokenKind::FunctionName.expects_operand());
    }
}
