//! `arithmetic/multiply_2d_by_1d`.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{create_stream, int_in_range};
use serde_json::json;

use crate::config::TemplateConfig;
use crate::html::inline_card;
use crate::template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "arithmetic/multiply_2d_by_1d";

const TWO_DIGIT: (i64, i64) = (12, 99);
const ONE_DIGIT: (i64, i64) = (2, 9);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ranges {
    two_digit: (i64, i64),
    one_digit: (i64, i64),
}

impl Ranges {
    fn from_config(config: &TemplateConfig) -> Self {
        Self {
            two_digit: config.int_range("twoDigitMin", "twoDigitMax", TWO_DIGIT),
            one_digit: config.int_range("oneDigitMin", "oneDigitMax", ONE_DIGIT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub a: i64,
    pub b: i64,
}

impl Product {
    #[must_use]
    pub fn answer(&self) -> i64 {
        self.a.saturating_mul(self.b)
    }
}

fn draw(request: &GenerationRequest) -> Result<Product, GenerationError> {
    let ranges = Ranges::from_config(&request.config);
    let mut rng = create_stream(request.seed);
    let a = int_in_range(&mut rng, ranges.two_digit.0, ranges.two_digit.1)?;
    let b = int_in_range(&mut rng, ranges.one_digit.0, ranges.one_digit.1)?;
    Ok(Product { a, b })
}

/// Multiplies a two-digit number by a one-digit number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiply2dBy1d;

impl Generator for Multiply2dBy1d {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let product = draw(request)?;
        let answer = product.answer();
        let data = match request.side {
            Side::Front => json!({ "a": product.a, "b": product.b }),
            Side::Back => json!({ "a": product.a, "b": product.b, "answer": answer }),
        };
        Ok(GenerationResult {
            html: inline_card(
                request.side,
                &format!("{} × {}", product.a, product.b),
                &answer.to_string(),
            ),
            data,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let product = match draw(request) {
            Ok(product) => product,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let ranges = Ranges::from_config(&request.config);
        let mut errors = Vec::new();
        if !(ranges.two_digit.0..=ranges.two_digit.1).contains(&product.a)
            || !(ranges.one_digit.0..=ranges.one_digit.1).contains(&product.b)
        {
            errors.push("operands out of range".to_owned());
        }
        if product.answer() <= 0 {
            errors.push("non-positive answer".to_owned());
        }
        Some(ValidationReport::from_findings(errors, Vec::new()))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Multiply 2-digit by 1-digit",
            &["multiplication"],
            &["4", "5", "6"],
            json!({
                "twoDigitMin": TWO_DIGIT.0,
                "twoDigitMax": TWO_DIGIT.1,
                "oneDigitMin": ONE_DIGIT.0,
                "oneDigitMax": ONE_DIGIT.1,
            }),
        ),
        Multiply2dBy1d,
    )
}
