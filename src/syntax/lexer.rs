use log::{debug, trace};

use super::token::{Token, TokenKind};
use crate::error::{LResult, LexError};

/// What a recognition rule matched, before sign disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawKind {
    Token(TokenKind),
    /// `-` immediately followed by a numeral. Either a signed number or a subtraction.
    NegativeNumber,
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawToken<'src> {
    pub value: &'src str,
    pub kind: RawKind,
    pub offset: usize,
}

/// Returns the byte length of the matched prefix, 0 for no match.
type Rule = fn(&str) -> usize;

// Order matters: a numeral must win over `-`, and `-` over everything else.
const RULES: &[(RawKind, Rule)] = &[
    (RawKind::Token(TokenKind::Number), read_number),
    (RawKind::NegativeNumber, read_negative_number),
    (RawKind::Token(TokenKind::MinusOp), read_minus),
    (RawKind::Token(TokenKind::AddOp), read_plus),
    (RawKind::Token(TokenKind::MultOp), read_star),
    (RawKind::Token(TokenKind::DivOp), read_slash),
    (RawKind::Token(TokenKind::ExpOp), read_caret),
    (RawKind::Token(TokenKind::LeftParen), read_left_paren),
    (RawKind::Token(TokenKind::RightParen), read_right_paren),
    (RawKind::Token(TokenKind::FunctionName), read_function_name),
    (RawKind::Whitespace, read_whitespace),
];

fn read_while<P>(s: &str, predicate: P) -> usize
where
    P: Fn(char) -> bool,
{
    s.char_indices()
        .find(|&(_, c)| !predicate(c))
        .map_or(s.len(), |(off, _)| off)
}

fn read_char(s: &str, expected: char) -> usize {
    if s.starts_with(expected) {
        expected.len_utf8()
    } else {
        0
    }
}

fn read_minus(s: &str) -> usize {
    read_char(s, '-')
}

fn read_plus(s: &str) -> usize {
    read_char(s, '+')
}

fn read_star(s: &str) -> usize {
    read_char(s, '*')
}

fn read_slash(s: &str) -> usize {
    read_char(s, '/')
}

fn read_caret(s: &str) -> usize {
    read_char(s, '^')
}

fn read_left_paren(s: &str) -> usize {
    read_char(s, '(')
}

fn read_right_paren(s: &str) -> usize {
    read_char(s, ')')
}

/// `\d+(\.\d+)?`
fn read_number(s: &str) -> usize {
    let int_len = read_while(s, |c| c.is_ascii_digit());
    if int_len == 0 {
        return 0;
    }
    match s[int_len..].strip_prefix('.') {
        Some(fraction) => match read_while(fraction, |c| c.is_ascii_digit()) {
            0 => int_len,
            frac_len => int_len + 1 + frac_len,
        },
        None => int_len,
    }
}

fn read_negative_number(s: &str) -> usize {
    match s.strip_prefix('-').map(read_number) {
        Some(0) | None => 0,
        Some(len) => len + 1,
    }
}

fn read_function_name(s: &str) -> usize {
    read_while(s, |c| c.is_ascii_alphabetic())
}

fn read_whitespace(s: &str) -> usize {
    read_while(s, char::is_whitespace)
}

/// Applies the recognition rules from left to right, skipping whitespace.
/// Yields a single `Err` and then stops when nothing matches.
pub(crate) struct Lexer<'src> {
    src: &'src str,
    cursor: usize,
}

impl<'src> Iterator for Lexer<'src> {
    type Item = LResult<RawToken<'src>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.src[self.cursor..];
            let offending = rest.chars().next()?;

            let matched = RULES.iter().find_map(|&(kind, rule)| match rule(rest) {
                0 => None,
                len => Some((kind, len)),
            });

            let Some((kind, len)) = matched else {
                let position = self.src[..self.cursor].chars().count();
                self.cursor = self.src.len();
                return Some(Err(LexError {
                    position,
                    offending,
                }));
            };

            let offset = self.cursor;
            self.cursor += len;

            if kind == RawKind::Whitespace {
                continue;
            }

            let token = RawToken {
                value: &rest[..len],
                kind,
                offset,
            };
            trace!("lexed {token:?}");
            return Some(Ok(token));
        }
    }
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, cursor: 0 }
    }
}

/// Resolves every raw negative number into either a signed numeral or a subtraction.
///
/// At the start of input or after `( + - * / ^` the `-` belongs to the numeral.
/// After an operand it becomes a `MinusOp` followed by the unsigned numeral, so the
/// parser only ever sees subtraction as a binary operator.
pub(crate) fn normalize<'src, I>(raw: I) -> Vec<Token<'src>>
where
    I: IntoIterator<Item = RawToken<'src>>,
{
    let mut tokens: Vec<Token<'src>> = vec![];

    for raw_token in raw {
        let RawToken {
            value,
            kind,
            offset,
        } = raw_token;

        match kind {
            RawKind::Token(kind) => tokens.push(Token::new(value, kind, offset)),
            RawKind::NegativeNumber => {
                let signed = tokens
                    .last()
                    .map_or(true, |prev| prev.kind.expects_operand());

                if signed {
                    tokens.push(Token::new(value, TokenKind::Number, offset));
                } else {
                    trace!("splitting `{value}` at {offset} into a subtraction");
                    tokens.push(Token::new(&value[..1], TokenKind::MinusOp, offset));
                    tokens.push(Token::new(&value[1..], TokenKind::Number, offset + 1));
                }
            }
            RawKind::Whitespace => (),
        }
    }

    tokens
}

/// Converts `src` into tokens. Fails on the first character no rule recognizes.
pub fn tokenize(src: &str) -> LResult<Vec<Token<'_>>> {
    let raw = Lexer::new(src).collect::<LResult<Vec<_>>>()?;
    let tokens = normalize(raw);
    debug!("tokenized {:?} into {} tokens", src, tokens.len());
    Ok(tokens)
}
