//! `arithmetic/multiply_decimals`: products of two decimals with up to two
//! places each.
//!
//! Operands are held as scaled integers, so the product is exact and
//! prints without float noise.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{RandomStream, create_stream, int_in_range};
use serde_json::json;

use crate::html::question_card;
use crate::numeric::{format_scaled_trimmed, pow10};
use crate::template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "arithmetic/multiply_decimals";

const DEFAULT_MAX: i64 = 30;
const OPERAND_CEILING: i64 = 1_000_000;

/// A decimal `units / 10^places`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    pub units: i64,
    pub places: u32,
}

impl Decimal {
    #[must_use]
    pub fn times(self, other: Self) -> Self {
        Self {
            units: self.units.saturating_mul(other.units),
            places: self.places + other.places,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.units as f64 / pow10(self.places) as f64
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_scaled_trimmed(self.units, self.places))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalProduct {
    pub first: Decimal,
    pub second: Decimal,
}

impl DecimalProduct {
    #[must_use]
    pub fn answer(&self) -> Decimal {
        self.first.times(self.second)
    }
}

/// Draws `1 + k / 10^places` with `k` in `[0, max * 10^places)`.
fn draw_operand<S: RandomStream + ?Sized>(
    rng: &mut S,
    max: i64,
    places: (i64, i64),
) -> Result<Decimal, GenerationError> {
    let places = u32::try_from(int_in_range(rng, places.0, places.1)?).unwrap_or(0);
    let scale = pow10(places);
    let k = int_in_range(rng, 0, max * scale - 1)?;
    Ok(Decimal {
        units: scale + k,
        places,
    })
}

fn limits(request: &GenerationRequest) -> (i64, i64) {
    let read = |key| {
        request
            .config
            .positive_int(key)
            .unwrap_or(DEFAULT_MAX)
            .min(OPERAND_CEILING)
    };
    (read("maxFirst"), read("maxSecond"))
}

fn draw(request: &GenerationRequest) -> Result<DecimalProduct, GenerationError> {
    let (max_first, max_second) = limits(request);
    let mut rng = create_stream(request.seed);
    let first = draw_operand(&mut rng, max_first, (0, 2))?;
    let second = draw_operand(&mut rng, max_second, (1, 2))?;
    Ok(DecimalProduct { first, second })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplyDecimals;

impl Generator for MultiplyDecimals {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let product = draw(request)?;
        let (first, second, answer) = (
            product.first.to_string(),
            product.second.to_string(),
            product.answer().to_string(),
        );
        let question = format!("What is {first} × {second}?");
        let data = match request.side {
            Side::Front => json!({ "first": first, "second": second }),
            Side::Back => json!({ "first": first, "second": second, "answer": answer }),
        };
        Ok(GenerationResult {
            html: question_card(request.side, &question, &format!("The answer is: {answer}")),
            data,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let product = match draw(request) {
            Ok(product) => product,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let (max_first, max_second) = limits(request);
        let mut errors = Vec::new();
        for (operand, max) in [(product.first, max_first), (product.second, max_second)] {
            let scale = pow10(operand.places);
            if operand.units < scale || operand.units >= (max + 1) * scale {
                errors.push(format!("operand {operand} outside [1, {})", max + 1));
            }
        }
        let approx = product.first.to_f64() * product.second.to_f64();
        if (approx - product.answer().to_f64()).abs() > 1e-6 {
            errors.push(format!("product {} disagrees with {approx}", product.answer()));
        }
        Some(ValidationReport::from_findings(errors, Vec::new()))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Multiply Decimals",
            &["multiplication", "decimals"],
            &["5", "6"],
            json!({ "maxFirst": DEFAULT_MAX, "maxSecond": DEFAULT_MAX }),
        )
        .with_field_bindings(&[("Max", "maxFirst"), ("Max2", "maxSecond")]),
        MultiplyDecimals,
    )
}
