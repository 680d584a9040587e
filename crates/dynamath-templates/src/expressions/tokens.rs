//! Expression tokens: random generation, parenthesis placement, text form.

use std::fmt;
use std::sync::LazyLock;

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{RandomStream, chance, int_in_range, pick};
use regex::Regex;

/// Probability that a generated expression gets a parenthesised group.
pub const PARENTHESES_PROBABILITY: f64 = 0.7;

static EXPONENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*\^\s*(\d+)").expect("exponent pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    /// Binding strength: `^` above `* /` above `+ -`.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 3,
        }
    }

    #[must_use]
    pub fn is_right_associative(self) -> bool {
        self == Self::Pow
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
    Open,
    Close,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Op(op) => f.write_str(op.symbol()),
            Self::Open => f.write_str("("),
            Self::Close => f.write_str(")"),
        }
    }
}

/// Shape of a generated expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionShape {
    /// Number of operands; at least 1.
    pub terms: usize,
    pub exponents: bool,
    pub parentheses: bool,
}

/// Generates `shape.terms` numbers joined by random operators. Operands are
/// 1-10, except exponents which are 2-4. With `shape.parentheses`, a group
/// is inserted with probability [`PARENTHESES_PROBABILITY`].
///
/// # Errors
///
/// Propagates `GenerationError` from the stream helpers.
pub fn generate_tokens<S: RandomStream + ?Sized>(
    rng: &mut S,
    shape: ExpressionShape,
) -> Result<Vec<Token>, GenerationError> {
    let mut operators = vec![Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];
    if shape.exponents {
        operators.push(Operator::Pow);
    }

    let mut tokens = Vec::with_capacity(shape.terms * 2 + 1);
    tokens.push(number(int_in_range(rng, 1, 10)?));
    for _ in 1..shape.terms {
        let op = *pick(rng, &operators)?;
        tokens.push(Token::Op(op));
        let operand = if op == Operator::Pow {
            int_in_range(rng, 2, 4)?
        } else {
            int_in_range(rng, 1, 10)?
        };
        tokens.push(number(operand));
    }

    if shape.parentheses && chance(rng, PARENTHESES_PROBABILITY) {
        insert_parentheses(rng, &mut tokens)?;
    }
    Ok(tokens)
}

#[allow(clippy::cast_precision_loss)]
fn number(n: i64) -> Token {
    Token::Number(n as f64)
}

/// Wraps a random sub-range in parentheses. The group opens right after an
/// operator other than `^` and closes right after a later number; when no
/// such pair exists the tokens are left unchanged.
///
/// # Errors
///
/// Propagates `GenerationError` from the stream helpers.
pub fn insert_parentheses<S: RandomStream + ?Sized>(
    rng: &mut S,
    tokens: &mut Vec<Token>,
) -> Result<(), GenerationError> {
    let starts: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t, Token::Op(op) if *op != Operator::Pow))
        .map(|(i, _)| i + 1)
        .collect();
    let ends: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t, Token::Number(_)))
        .map(|(i, _)| i + 1)
        .collect();
    if starts.is_empty() || ends.is_empty() {
        return Ok(());
    }

    let start = *pick(rng, &starts)?;
    let valid_ends: Vec<usize> = ends.into_iter().filter(|end| *end > start).collect();
    if valid_ends.is_empty() {
        return Ok(());
    }
    let end = *pick(rng, &valid_ends)?;
    tokens.insert(start, Token::Open);
    tokens.insert(end + 1, Token::Close);
    Ok(())
}

/// Plain-text form, e.g. `3 + (4 * 2) ^ 2`.
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let after_open = i > 0 && tokens[i - 1] == Token::Open;
        if i > 0 && !after_open && *token != Token::Close {
            out.push(' ');
        }
        out.push_str(&token.to_string());
    }
    out
}

/// Renders `base ^ exponent` pairs of plain numbers as
/// `base<sup>exponent</sup>`. Exponents applied to a parenthesised group
/// are left as written.
#[must_use]
pub fn format_with_superscript(expression: &str) -> String {
    EXPONENT_PATTERN
        .replace_all(expression, "${1}<sup>${2}</sup>")
        .into_owned()
}

/// Splits expression text into tokens. Accepts non-negative decimal
/// numbers, `+ - * / ^`, `**` as a synonym for `^`, and parentheses.
///
/// # Errors
///
/// Returns `GenerationError::Evaluation` on any other character.
pub fn tokenize(text: &str) -> Result<Vec<Token>, GenerationError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '0'..='9' | '.' => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, d)) = chars.peek() {
                    if !(d.is_ascii_digit() || d == '.') {
                        break;
                    }
                    end = j + d.len_utf8();
                    chars.next();
                }
                let literal = &text[i..end];
                let value = literal.parse::<f64>().map_err(|_| {
                    GenerationError::Evaluation(format!("invalid number {literal:?}"))
                })?;
                Token::Number(value)
            }
            '+' => Token::Op(Operator::Add),
            '-' => Token::Op(Operator::Sub),
            '/' => Token::Op(Operator::Div),
            '^' => Token::Op(Operator::Pow),
            '*' => {
                if chars.peek().is_some_and(|&(_, next)| next == '*') {
                    chars.next();
                    Token::Op(Operator::Pow)
                } else {
                    Token::Op(Operator::Mul)
                }
            }
            '(' => Token::Open,
            ')' => Token::Close,
            other => {
                return Err(GenerationError::Evaluation(format!(
                    "unexpected character {other:?}"
                )));
            }
        };
        tokens.push(token);
    }
    Ok(tokens)
}
