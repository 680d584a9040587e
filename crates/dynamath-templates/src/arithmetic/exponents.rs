//! `arithmetic/exponent_to_factors`: expand a power into repeated factors.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{create_stream, int_in_range};
use serde_json::json;

use crate::html::question_card;
use crate::template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "arithmetic/exponent_to_factors";

const DEFAULT_MAX_BASE: i64 = 9;
const DEFAULT_MAX_EXPONENT: i64 = 6;
const DEFAULT_MIN_EXPONENT: i64 = 1;
const EXPONENT_CEILING: i64 = 50;

/// Writes `base^exponent` as a product: exponent 0 is `"1"`, exponent 1 is
/// the base alone, otherwise the base repeated and joined by ` × `.
#[must_use]
pub fn product_string(base: i64, exponent: u32) -> String {
    match exponent {
        0 => "1".to_owned(),
        n => vec![base.to_string(); n as usize].join(" × "),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Power {
    pub base: i64,
    pub exponent: u32,
}

impl Power {
    #[must_use]
    pub fn notation(&self) -> String {
        format!("{}<sup>{}</sup>", self.base, self.exponent)
    }
}

fn exponent_range(request: &GenerationRequest) -> (i64, i64) {
    let config = &request.config;
    let max = config
        .positive_int("maxExponent")
        .unwrap_or(DEFAULT_MAX_EXPONENT)
        .min(EXPONENT_CEILING);
    let min = config
        .int("minExponent")
        .filter(|n| (0..=max).contains(n))
        .unwrap_or(DEFAULT_MIN_EXPONENT.min(max));
    (min, max)
}

fn draw(request: &GenerationRequest) -> Result<Power, GenerationError> {
    let max_base = request
        .config
        .positive_int("maxBase")
        .unwrap_or(DEFAULT_MAX_BASE);
    let (min_exponent, max_exponent) = exponent_range(request);
    let mut rng = create_stream(request.seed);
    let base = int_in_range(&mut rng, 1, max_base)?;
    let exponent = int_in_range(&mut rng, min_exponent, max_exponent)?;
    Ok(Power {
        base,
        exponent: u32::try_from(exponent).unwrap_or(0),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentToFactors;

impl Generator for ExponentToFactors {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let power = draw(request)?;
        let factors = product_string(power.base, power.exponent);
        let question = format!("What is {} as a product of factors?", power.notation());
        let answer = format!("{} = {factors}", power.notation());
        let data = match request.side {
            Side::Front => json!({ "base": power.base, "exponent": power.exponent }),
            Side::Back => json!({
                "base": power.base,
                "exponent": power.exponent,
                "factors": factors,
            }),
        };
        Ok(GenerationResult {
            html: question_card(request.side, &question, &answer),
            data,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let power = match draw(request) {
            Ok(power) => power,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let factors = product_string(power.base, power.exponent);
        let expected_count = power.exponent.max(1) as usize;
        let mut errors = Vec::new();
        if factors.split(" × ").count() != expected_count {
            errors.push(format!("{factors} does not have {expected_count} factors"));
        }
        let mut warnings = Vec::new();
        if power.base == 1 {
            warnings.push("base 1 makes every factor 1".to_owned());
        }
        Some(ValidationReport::from_findings(errors, warnings))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Exponents as Repeated Factors",
            &["exponents"],
            &["5", "6"],
            json!({
                "maxBase": DEFAULT_MAX_BASE,
                "maxExponent": DEFAULT_MAX_EXPONENT,
                "minExponent": DEFAULT_MIN_EXPONENT,
            }),
        )
        .with_field_bindings(&[("MaxBase", "maxBase"), ("MaxExponent", "maxExponent")]),
        ExponentToFactors,
    )
}
