//! `arithmetic/long_division`: four-digit dividends over two-digit divisors.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{create_stream, int_in_range};
use serde_json::json;

use crate::html::question_card;
use crate::template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "arithmetic/long_division";

const MIN_DIVISOR: i64 = 10;
const MIN_DIVIDEND: i64 = 1000;
const DEFAULT_MAX_DIVISOR: i64 = 99;
const DEFAULT_MAX_DIVIDEND: i64 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Division {
    pub dividend: i64,
    pub divisor: i64,
}

impl Division {
    #[must_use]
    pub fn quotient(&self) -> i64 {
        self.dividend / self.divisor
    }

    #[must_use]
    pub fn remainder(&self) -> i64 {
        self.dividend % self.divisor
    }

    /// `"327"` when the division is exact, else `"327 with remainder 22"`.
    #[must_use]
    pub fn answer_text(&self) -> String {
        match self.remainder() {
            0 => self.quotient().to_string(),
            r => format!("{} with remainder {r}", self.quotient()),
        }
    }
}

fn limits(request: &GenerationRequest) -> (i64, i64) {
    let config = &request.config;
    let max_divisor = config
        .int("maxDivisor")
        .filter(|n| *n >= MIN_DIVISOR)
        .unwrap_or(DEFAULT_MAX_DIVISOR);
    let max_dividend = config
        .int("maxDividend")
        .filter(|n| *n >= MIN_DIVIDEND)
        .unwrap_or(DEFAULT_MAX_DIVIDEND);
    (max_divisor, max_dividend)
}

fn draw(request: &GenerationRequest) -> Result<Division, GenerationError> {
    let (max_divisor, max_dividend) = limits(request);
    let mut rng = create_stream(request.seed);
    let divisor = int_in_range(&mut rng, MIN_DIVISOR, max_divisor)?;
    let dividend = int_in_range(&mut rng, MIN_DIVIDEND, max_dividend)?;
    Ok(Division { dividend, divisor })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LongDivision;

impl Generator for LongDivision {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let division = draw(request)?;
        let question = format!("{} ÷ {}", division.dividend, division.divisor);
        let data = match request.side {
            Side::Front => json!({ "dividend": division.dividend, "divisor": division.divisor }),
            Side::Back => json!({
                "dividend": division.dividend,
                "divisor": division.divisor,
                "quotient": division.quotient(),
                "remainder": division.remainder(),
            }),
        };
        Ok(GenerationResult {
            html: question_card(
                request.side,
                &question,
                &format!("The answer is: {}", division.answer_text()),
            ),
            data,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let division = match draw(request) {
            Ok(division) => division,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let mut errors = Vec::new();
        if division.quotient() * division.divisor + division.remainder() != division.dividend {
            errors.push("quotient and remainder do not reconstruct the dividend".to_owned());
        }
        if !(0..division.divisor).contains(&division.remainder()) {
            errors.push(format!("remainder {} out of range", division.remainder()));
        }
        let mut warnings = Vec::new();
        if division.quotient() < MIN_DIVISOR {
            warnings.push("quotient has a single digit".to_owned());
        }
        Some(ValidationReport::from_findings(errors, warnings))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Long Division",
            &["division", "remainders"],
            &["4", "5", "6"],
            json!({ "maxDivisor": DEFAULT_MAX_DIVISOR, "maxDividend": DEFAULT_MAX_DIVIDEND }),
        )
        .with_field_bindings(&[("Max", "maxDivisor"), ("Max2", "maxDividend")]),
        LongDivision,
    )
}
