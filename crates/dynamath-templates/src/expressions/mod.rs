//! `arithmetic/order_of_operations`: evaluate a random expression.
//!
//! The back side replays the same token draws as the front and evaluates
//! them. Evaluation failures do not fail generation; they render an inline
//! message and report `success: false` in the data.

pub mod evaluator;
pub mod tokens;

use dynamath_core::error::GenerationError;
use dynamath_core::rng::create_stream;
use serde_json::json;
use tracing::debug;

use self::evaluator::evaluate;
use self::tokens::{ExpressionShape, Token, format_with_superscript, generate_tokens, render};
use crate::config::TemplateConfig;
use crate::html::question_card;
use crate::numeric::{decimal_to_mixed_fraction, format_number, round_to_precision_and_trim};
use crate::template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "arithmetic/order_of_operations";

const DEFAULT_TERMS: usize = 4;
const MAX_TERMS: usize = 12;
const DECIMAL_PLACES: usize = 3;
const LARGE_RESULT: f64 = 1e6;

/// How the evaluated result is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerFormat {
    /// Mixed number, e.g. `2 1/3`.
    #[default]
    Fraction,
    /// Decimal rounded to three places.
    Decimal,
}

impl AnswerFormat {
    fn from_config(config: &TemplateConfig) -> Self {
        match config.text("answerFormat") {
            Some(format) if format.eq_ignore_ascii_case("decimal") => Self::Decimal,
            _ => Self::Fraction,
        }
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Fraction => decimal_to_mixed_fraction(value),
            Self::Decimal => format_number(round_to_precision_and_trim(value, DECIMAL_PLACES)),
        }
    }
}

fn shape(config: &TemplateConfig) -> ExpressionShape {
    let terms = config
        .positive_int("numTerms")
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(DEFAULT_TERMS)
        .min(MAX_TERMS);
    ExpressionShape {
        terms,
        exponents: config.flag("includeExponents").unwrap_or(true),
        parentheses: config.flag("includeParens").unwrap_or(true),
    }
}

fn draw(request: &GenerationRequest) -> Result<Vec<Token>, GenerationError> {
    generate_tokens(&mut create_stream(request.seed), shape(&request.config))
}

/// Evaluates `tokens` into the back-side answer text and its data.
fn answer_block(
    tokens: &[Token],
    expression: &str,
    display: &str,
    format: AnswerFormat,
) -> (String, serde_json::Value) {
    match evaluate(tokens) {
        Ok(value) => {
            let formatted = format.format(value);
            (
                format!("{display} = {formatted}"),
                json!({
                    "expression": expression,
                    "value": value,
                    "answer": formatted,
                    "success": true,
                }),
            )
        }
        Err(e) => {
            let message = match e {
                GenerationError::Evaluation(message) => message,
                other => other.to_string(),
            };
            debug!(%expression, %message, "expression failed to evaluate");
            (
                format!("Error evaluating expression: {message}"),
                json!({ "expression": expression, "success": false, "error": message }),
            )
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderOfOperations;

impl Generator for OrderOfOperations {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let tokens = draw(request)?;
        let expression = render(&tokens);
        let display = format_with_superscript(&expression);
        let question = format!("Evaluate the expression: {display}");

        if request.side == Side::Front {
            return Ok(GenerationResult {
                html: question_card(Side::Front, &question, ""),
                data: json!({ "expression": expression }),
            });
        }

        let format = AnswerFormat::from_config(&request.config);
        let (answer, data) = answer_block(&tokens, &expression, &display, format);
        Ok(GenerationResult {
            html: question_card(Side::Back, &question, &answer),
            data,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let tokens = match draw(request) {
            Ok(tokens) => tokens,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let report = match evaluate(&tokens) {
            Ok(value) => {
                let mut warnings = Vec::new();
                if value.abs() >= LARGE_RESULT {
                    warnings.push(format!("result {} is very large", format_number(value)));
                }
                ValidationReport::from_findings(Vec::new(), warnings)
            }
            Err(e) => ValidationReport::failure(e),
        };
        Some(report)
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Order of Operations",
            &["order-of-operations", "exponents", "fractions"],
            &["6", "7"],
            json!({
                "numTerms": DEFAULT_TERMS,
                "includeExponents": true,
                "includeParens": true,
                "answerFormat": "fraction",
            }),
        )
        .with_field_bindings(&[
            ("NumTerms", "numTerms"),
            ("IncludeExponents", "includeExponents"),
        ]),
        OrderOfOperations,
    )
}
