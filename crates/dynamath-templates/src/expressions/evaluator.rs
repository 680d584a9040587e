//! Precedence-climbing evaluation of expression tokens.

use dynamath_core::error::GenerationError;

use super::tokens::{Operator, Token, tokenize};

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn expression(&mut self, min_precedence: u8) -> Result<f64, GenerationError> {
        let mut lhs = self.primary()?;
        while let Some(Token::Op(op)) = self.peek() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.pos += 1;
            let next = if op.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let rhs = self.expression(next)?;
            lhs = apply(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<f64, GenerationError> {
        match self.peek() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(n)
            }
            Some(Token::Open) => {
                self.pos += 1;
                let value = self.expression(0)?;
                if self.peek() != Some(Token::Close) {
                    return Err(GenerationError::Evaluation(
                        "missing closing parenthesis".to_owned(),
                    ));
                }
                self.pos += 1;
                Ok(value)
            }
            Some(token) => Err(GenerationError::Evaluation(format!(
                "unexpected token '{token}'"
            ))),
            None => Err(GenerationError::Evaluation(
                "unexpected end of expression".to_owned(),
            )),
        }
    }
}

fn apply(op: Operator, lhs: f64, rhs: f64) -> Result<f64, GenerationError> {
    match op {
        Operator::Add => Ok(lhs + rhs),
        Operator::Sub => Ok(lhs - rhs),
        Operator::Mul => Ok(lhs * rhs),
        Operator::Div if rhs == 0.0 => {
            Err(GenerationError::Evaluation("division by zero".to_owned()))
        }
        Operator::Div => Ok(lhs / rhs),
        Operator::Pow => Ok(lhs.powf(rhs)),
    }
}

/// Evaluates tokens with `^` binding tightest and right-associative, then
/// `* /`, then `+ -`, both left-associative.
///
/// # Errors
///
/// Returns `GenerationError::Evaluation` for malformed input, division by
/// zero, or a non-finite result.
pub fn evaluate(tokens: &[Token]) -> Result<f64, GenerationError> {
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression(0)?;
    if let Some(token) = parser.peek() {
        return Err(GenerationError::Evaluation(format!(
            "unexpected token '{token}'"
        )));
    }
    if !value.is_finite() {
        return Err(GenerationError::Evaluation(format!(
            "result {value} is not finite"
        )));
    }
    Ok(value)
}

/// Tokenizes and evaluates expression text.
///
/// # Errors
///
/// Returns `GenerationError::Evaluation` as [`evaluate`] and [`tokenize`] do.
pub fn evaluate_expression(text: &str) -> Result<f64, GenerationError> {
    evaluate(&tokenize(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> f64 {
        evaluate_expression(text).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3"), 5.0);
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("(2 + 3) * 4"), 20.0);
        assert_eq!(eval("2 ^ 3 + 1"), 9.0);
        assert_eq!(eval("2 * 3 ^ 2"), 18.0);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("8 / 4 / 2"), 1.0);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        assert_eq!(eval("2 ^ 3 ^ 2"), 512.0);
        assert_eq!(eval("(2 ^ 3) ^ 2"), 64.0);
    }

    #[test]
    fn test_division_yields_fractions() {
        assert_eq!(eval("7 / 2"), 3.5);
        assert!((eval("1 / 3") - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_expressions() {
        for text in ["2 +", "(2 + 3", "2 3", ")", ""] {
            assert!(
                matches!(evaluate_expression(text), Err(GenerationError::Evaluation(_))),
                "{text:?} should fail"
            );
        }
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate_expression("4 / (2 - 2)"),
            Err(GenerationError::Evaluation("division by zero".to_owned()))
        );
    }
}
