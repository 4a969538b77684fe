use std::{iter::Peekable, vec::IntoIter};

use log::debug;

use crate::{
    config::Config,
    error::{Error, PResult, ParseError},
    syntax::{
        expr::{Expression, ExpressionTree},
        lexer::tokenize,
        token::{Token, TokenKind},
    },
};

/// A parsed subtree together with its height.
type Node<'src> = (Expression<'src>, usize);

/// Recursive-descent parser with one token of lookahead.
///
/// ```text
/// expression     := addition
/// addition       := multiplication ( ('+' | '-') multiplication )*
/// multiplication := exponentiation ( ('*' | '/') exponentiation )*
/// exponentiation := terminal ( '^' terminal )*
/// terminal       := NUMBER
///                 | FUNCTION_NAME '(' expression ')'
///                 | FUNCTION_NAME
///                 | '(' expression ')'
/// ```
///
/// Every binary level is left-associative, `^` included: `2^3^2` is `(2^3)^2`.
///
/// Two limits keep later recursive passes over the tree bounded: `max_depth` caps
/// parenthesis and call nesting, `max_height` caps the height of the tree built.
/// Error positions are character offsets into `src`.
pub struct Parser<'src> {
    src: &'src str,
    tokens: Peekable<IntoIter<Token<'src>>>,
    depth: usize,
    max_depth: usize,
    max_height: usize,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str, tokens: Vec<Token<'src>>, config: &Config) -> Self {
        Self {
            src,
            tokens: tokens.into_iter().peekable(),
            depth: 0,
            max_depth: config.max_depth,
            max_height: config.max_height,
        }
    }

    /// Parses the whole token stream. Tokens left over after the expression are an error.
    pub fn parse(mut self) -> PResult<ExpressionTree<'src>> {
        if self.tokens.peek().is_none() {
            return Ok(ExpressionTree::Empty);
        }

        let root = self.parse_expr()?;

        if let Some(token) = self.tokens.peek().copied() {
            return Err(ParseError::TrailingInput {
                position: self.position_of(&token),
                found: token.value.to_string(),
            });
        }

        Ok(ExpressionTree::Root(root))
    }

    pub fn parse_expr(&mut self) -> PResult<Expression<'src>> {
        self.parse_addition().map(|(expr, _)| expr)
    }

    fn parse_addition(&mut self) -> PResult<Node<'src>> {
        self.parse_left_assoc(
            &[TokenKind::AddOp, TokenKind::MinusOp],
            Self::parse_multiplication,
        )
    }

    fn parse_multiplication(&mut self) -> PResult<Node<'src>> {
        self.parse_left_assoc(
            &[TokenKind::MultOp, TokenKind::DivOp],
            Self::parse_exponentiation,
        )
    }

    fn parse_exponentiation(&mut self) -> PResult<Node<'src>> {
        self.parse_left_assoc(&[TokenKind::ExpOp], Self::parse_terminal)
    }

    fn parse_left_assoc<F>(&mut self, ops: &[TokenKind], mut operand: F) -> PResult<Node<'src>>
    where
        F: FnMut(&mut Self) -> PResult<Node<'src>>,
    {
        let (mut lhs, mut height) = operand(self)?;

        while let Some(op) = self.tokens.next_if(|t| ops.contains(&t.kind)) {
            let (rhs, rhs_height) = operand(self)?;
            height = self.grow(height.max(rhs_height), &op)?;
            lhs = Expression::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok((lhs, height))
    }

    fn parse_terminal(&mut self) -> PResult<Node<'src>> {
        match self.tokens.next() {
            None => Err(ParseError::UnexpectedEnd {
                position: self.end_position(),
            }),
            Some(token) => match token.kind {
                TokenKind::Number => Ok((Expression::Number(token), 1)),
                TokenKind::FunctionName => match self.tokens.peek() {
                    Some(next) if next.is(TokenKind::LeftParen) => self.parse_call_expr(token),
                    _ => Ok((Expression::Function(token), 1)),
                },
                TokenKind::LeftParen => self.parse_grouping_expr(token),
                _ => Err(ParseError::UnexpectedToken {
                    position: self.position_of(&token),
                    found: token.value.to_string(),
                }),
            },
        }
    }

    /// The opening `(` has already been consumed.
    fn parse_grouping_expr(&mut self, open: Token<'src>) -> PResult<Node<'src>> {
        self.nested(open, |parser| {
            let node = parser.parse_addition()?;
            parser.consume(TokenKind::RightParen)?;
            Ok(node)
        })
    }

    fn parse_call_expr(&mut self, name: Token<'src>) -> PResult<Node<'src>> {
        let open = self.consume(TokenKind::LeftParen)?;
        self.nested(open, |parser| {
            let (arg, arg_height) = parser.parse_addition()?;
            parser.consume(TokenKind::RightParen)?;
            let height = parser.grow(arg_height, &name)?;
            Ok((
                Expression::Call {
                    name,
                    arg: Box::new(arg),
                },
                height,
            ))
        })
    }

    fn nested<F>(&mut self, open: Token<'src>, inner: F) -> PResult<Node<'src>>
    where
        F: FnOnce(&mut Self) -> PResult<Node<'src>>,
    {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep {
                position: self.position_of(&open),
                limit: self.max_depth,
            });
        }

        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    /// Height of a node built by `token` over children at most `height` tall.
    fn grow(&self, height: usize, token: &Token<'src>) -> PResult<usize> {
        if height >= self.max_height {
            return Err(ParseError::TooTall {
                position: self.position_of(token),
                limit: self.max_height,
            });
        }
        Ok(height + 1)
    }

    /// Advances past the lookahead if it is of `kind`.
    pub fn consume(&mut self, kind: TokenKind) -> PResult<Token<'src>> {
        if let Some(token) = self.tokens.next_if(|t| t.is(kind)) {
            return Ok(token);
        }

        Err(match self.tokens.peek().copied() {
            Some(found) => ParseError::Expected {
                position: self.position_of(&found),
                expected: kind,
                found: Some(found.value.to_string()),
            },
            None => ParseError::Expected {
                position: self.end_position(),
                expected: kind,
                found: None,
            },
        })
    }

    fn position_of(&self, token: &Token<'src>) -> usize {
        self.src
            .get(..token.offset)
            .map_or(token.offset, |before| before.chars().count())
    }

    fn end_position(&self) -> usize {
        self.src.chars().count()
    }
}

/// Parses an already tokenized `src`.
pub fn parse<'src>(
    src: &'src str,
    tokens: Vec<Token<'src>>,
    config: &Config,
) -> PResult<ExpressionTree<'src>> {
    let tree = Parser::new(src, tokens, config).parse()?;
    debug!("parsed {src:?}: {}", if tree.is_empty() { "empty" } else { "ok" });
    Ok(tree)
}

/// Tokenizes and parses `src`.
pub fn parse_str<'src>(src: &'src str, config: &Config) -> Result<ExpressionTree<'src>, Error> {
    let tokens = tokenize(src)?;
    Ok(parse(src, tokens, config)?)
}

#[cfg(test)]
mod test {
    use super::parse_str;
    use crate::{
        config::{Config, DEFAULT_MAX_DEPTH, DEFAULT_MAX_HEIGHT},
        error::{Error, ParseError},
        syntax::{
            expr::{Expression, ExpressionTree},
            token::{Token, TokenKind},
        },
    };

    fn parse(src: &str) -> Result<ExpressionTree<'_>, Error> {
        parse_str(src, &Config::default())
    }

    fn parse_err(src: &str) -> ParseError {
        match parse(src) {
            Err(Error::Parse(err)) => err,
            other => panic!("expected a parse error for {src:?}, got {other:?}"),
        }
    }

    fn num(value: &str, offset: usize) -> Box<Expression<'_>> {
        Box::new(Expression::Number(Token::new(value, TokenKind::Number, offset)))
    }

    fn binary<'a>(
        op: &'a str,
        kind: TokenKind,
        offset: usize,
        lhs: Box<Expression<'a>>,
        rhs: Box<Expression<'a>>,
    ) -> Box<Expression<'a>> {
        Box::new(Expression::Binary {
            op: Token::new(op, kind, offset),
            lhs,
            rhs,
        })
    }

    #[test]
    fn parse_binary_expr() {
        use TokenKind::*;

        let tree = parse("-5+4*7").unwrap();
        let expected = binary(
            "+",
            AddOp,
            2,
            num("-5", 0),
            binary("*", MultOp, 4, num("4", 3), num("7", 5)),
        );

        assert_eq!(tree, ExpressionTree::Root(*expected));
    }

    #[test]
    fn parse_grouping_collapses() {
        use TokenKind::*;

        let tree = parse("(1+2)*3").unwrap();
        let expected = binary(
            "*",
            MultOp,
            5,
            binary("+", AddOp, 2, num("1", 1), num("2", 3)),
            num("3", 6),
        );

        assert_eq!(tree, ExpressionTree::Root(*expected));
    }

    #[test]
    fn exponent_is_left_assoc() {
        use TokenKind::*;

        let tree = parse("2^3^2").unwrap();
        let expected = binary(
            "^",
            ExpOp,
            3,
            binary("^", ExpOp, 1, num("2", 0), num("3", 2)),
            num("2", 4),
        );

        assert_eq!(tree, ExpressionTree::Root(*expected));
    }

    #[test]
    fn subtraction_is_left_assoc() {
        use TokenKind::*;

        let tree = parse("5-2-1").unwrap();
        let expected = binary(
            "-",
            MinusOp,
            3,
            binary("-", MinusOp, 1, num("5", 0), num("2", 2)),
            num("1", 4),
        );

        assert_eq!(tree, ExpressionTree::Root(*expected));
    }

    #[test]
    fn parse_call() {
        use TokenKind::*;

        let tree = parse("2*sin(1+1)").unwrap();
        let expected = binary(
            "*",
            MultOp,
            1,
            num("2", 0),
            Box::new(Expression::Call {
                name: Token::new("sin", FunctionName, 2),
                arg: binary("+", AddOp, 7, num("1", 6), num("1", 8)),
            }),
        );

        assert_eq!(tree, ExpressionTree::Root(*expected));
    }

    #[test]
    fn call_binds_tighter_than_exponent() {
        let tree = parse("sqrt(4)^2").unwrap();
        match tree.root() {
            Some(Expression::Binary { op, lhs, .. }) => {
                assert_eq!(op.kind, TokenKind::ExpOp);
                assert!(matches!(**lhs, Expression::Call { .. }));
            }
            other => panic!("unexpected tree {other:?}"),
        }
    }

    #[test]
    fn bare_function_name() {
        let tree = parse("pi").unwrap();
        assert_eq!(
            tree,
            ExpressionTree::Root(Expression::Function(Token::new(
                "pi",
                TokenKind::FunctionName,
                0
            )))
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse("").unwrap(), ExpressionTree::Empty);
        assert_eq!(parse("   ").unwrap(), ExpressionTree::Empty);
    }

    #[test]
    fn unbalanced_paren() {
        assert_eq!(
            parse_err("(2+3"),
            ParseError::Expected {
                position: 4,
                expected: TokenKind::RightParen,
                found: None,
            }
        );
    }

    #[test]
    fn unclosed_call() {
        assert_eq!(
            parse_err("cos(1 2"),
            ParseError::Expected {
                position: 6,
                expected: TokenKind::RightParen,
                found: Some("2".into()),
            }
        );
    }

    #[test]
    fn trailing_input() {
        assert_eq!(
            parse_err("2+3)"),
            ParseError::TrailingInput {
                position: 3,
                found: ")".into(),
            }
        );
        // no implicit multiplication
        assert_eq!(parse_err("2(3)").position(), 1);
    }

    #[test]
    fn missing_operand() {
        assert_eq!(parse_err("2+"), ParseError::UnexpectedEnd { position: 2 });
        assert_eq!(
            parse_err("2+*3"),
            ParseError::UnexpectedToken {
                position: 2,
                found: "*".into(),
            }
        );
        assert_eq!(parse_err("()").position(), 1);
    }

    #[test]
    fn nesting_limit() {
        let config = Config::default().with_max_depth(2);

        assert!(parse_str("((1))", &config).is_ok());
        assert!(parse_str("sin((1))", &config).is_ok());
        assert_eq!(
            parse_str("(((1)))", &config),
            Err(Error::Parse(ParseError::TooDeep {
                position: 2,
                limit: 2,
            }))
        );
        assert_eq!(
            parse_str("sin(cos(tan(1)))", &config),
            Err(Error::Parse(ParseError::TooDeep {
                position: 11,
                limit: 2,
            }))
        );
    }

    #[test]
    fn deep_nesting_fails_instead_of_overflowing() {
        let src = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(
            parse_str(&src, &Config::default()),
            Err(Error::Parse(ParseError::TooDeep { limit: DEFAULT_MAX_DEPTH, .. }))
        ));
    }

    #[test]
    fn height_limit() {
        let config = Config::default().with_max_height(3);

        assert!(parse_str("1+2*3", &config).is_ok());
        assert!(parse_str("sqrt(sin(1))", &config).is_ok());
        assert_eq!(
            parse_str("1+2+3+4", &config),
            Err(Error::Parse(ParseError::TooTall {
                position: 5,
                limit: 3,
            }))
        );
        assert_eq!(
            parse_str("sqrt(sin(cos(1)))", &config),
            Err(Error::Parse(ParseError::TooTall {
                position: 0,
                limit: 3,
            }))
        );
    }

    #[test]
    fn grouping_does_not_add_height() {
        let config = Config::default().with_max_height(2);
        assert!(parse_str("((((1+2))))", &config).is_ok());
    }

    #[test]
    fn long_chains_fail_instead_of_overflowing() {
        for op in ["+", "*", "^"] {
            let src = format!("1{}", format!(" {op} 1").repeat(100_000));
            let err = parse_err(&src);
            assert!(
                matches!(err, ParseError::TooTall { limit: DEFAULT_MAX_HEIGHT, .. }),
                "{op}: {err:?}"
            );
            // the operator that would have made the tree one level too tall
            assert_eq!(err.position(), 4 * DEFAULT_MAX_HEIGHT - 2);
        }
    }

    #[test]
    fn positions_count_characters() {
        // U+00A0 is whitespace but two bytes long
        assert_eq!(
            parse_err("\u{a0}(2+3"),
            ParseError::Expected {
                position: 5,
                expected: TokenKind::RightParen,
                found: None,
            }
        );
        assert_eq!(
            parse_err("\u{a0}\u{a0}2 )"),
            ParseError::TrailingInput {
                position: 4,
                found: ")".into(),
            }
        );
    }
}
