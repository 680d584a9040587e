//! `arithmetic/rounding`: round a four-decimal value to a named place.
//!
//! Values are drawn in ten-thousandths and rounded with integer
//! arithmetic, half away from zero.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{create_stream, int_in_range, pick};
use serde_json::json;

use crate::html::question_card;
use crate::numeric::{format_scaled, format_scaled_trimmed, pow10};
use crate::template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "arithmetic/rounding";

/// Returned by [`place_value_name`] for multipliers outside the table.
pub const INVALID_PLACE: &str = "invalid value";

const VALUE_SCALE: u32 = 4;
const DEFAULT_MAX_VALUE: i64 = 3000;
const MAX_VALUE_CEILING: i64 = 1_000_000_000;
const DEFAULT_MIN_ROUND: f64 = 0.001;

/// A place value learners round to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub multiplier: f64,
    pub name: &'static str,
    /// Decimals shown once rounded to this place.
    pub decimals: u32,
}

impl Place {
    /// Size of one step at this place, in ten-thousandths.
    fn step_units(&self) -> i64 {
        match self.decimals {
            0 => {
                #[allow(clippy::cast_possible_truncation)]
                let whole = self.multiplier as i64;
                whole * pow10(VALUE_SCALE)
            }
            d => pow10(VALUE_SCALE - d),
        }
    }
}

pub const PLACES: [Place; 6] = [
    Place { multiplier: 100.0, name: "hundreds", decimals: 0 },
    Place { multiplier: 10.0, name: "tens", decimals: 0 },
    Place { multiplier: 1.0, name: "ones", decimals: 0 },
    Place { multiplier: 0.1, name: "tenths", decimals: 1 },
    Place { multiplier: 0.01, name: "hundredths", decimals: 2 },
    Place { multiplier: 0.001, name: "thousandths", decimals: 3 },
];

/// Names the place for `multiplier`. Only the exact table values match;
/// anything else, however close, is [`INVALID_PLACE`].
#[must_use]
#[allow(clippy::float_cmp)]
pub fn place_value_name(multiplier: f64) -> &'static str {
    PLACES
        .iter()
        .find(|place| place.multiplier == multiplier)
        .map_or(INVALID_PLACE, |place| place.name)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingProblem {
    /// The value in ten-thousandths.
    pub units: i64,
    pub place: Place,
}

impl RoundingProblem {
    #[must_use]
    pub fn value_text(&self) -> String {
        format_scaled_trimmed(self.units, VALUE_SCALE)
    }

    /// The rounded value in ten-thousandths.
    #[must_use]
    pub fn rounded_units(&self) -> i64 {
        let step = self.place.step_units();
        (self.units + step / 2) / step * step
    }

    /// The rounded value printed with the place's decimal count.
    #[must_use]
    pub fn rounded_text(&self) -> String {
        let decimals = self.place.decimals;
        format_scaled(
            self.rounded_units() / pow10(VALUE_SCALE - decimals),
            decimals,
        )
    }
}

fn allowed_places(request: &GenerationRequest) -> Vec<Place> {
    let min_round = request
        .config
        .float("minRound")
        .filter(|m| *m > DEFAULT_MIN_ROUND)
        .unwrap_or(DEFAULT_MIN_ROUND);
    let allowed: Vec<Place> = PLACES
        .iter()
        .copied()
        .filter(|place| place.multiplier >= min_round * (1.0 - 1e-9))
        .collect();
    if allowed.is_empty() {
        PLACES.to_vec()
    } else {
        allowed
    }
}

fn draw(request: &GenerationRequest) -> Result<RoundingProblem, GenerationError> {
    let max_value = request
        .config
        .positive_int("maxValue")
        .unwrap_or(DEFAULT_MAX_VALUE)
        .min(MAX_VALUE_CEILING);
    let places = allowed_places(request);
    let mut rng = create_stream(request.seed);
    let units = int_in_range(&mut rng, 0, max_value * pow10(VALUE_SCALE) - 1)?;
    let place = *pick(&mut rng, &places)?;
    Ok(RoundingProblem { units, place })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Rounding;

impl Generator for Rounding {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let problem = draw(request)?;
        let value = problem.value_text();
        let name = place_value_name(problem.place.multiplier);
        let question = format!("What is {value} rounded to the nearest {name}?");
        let rounded = problem.rounded_text();
        let data = match request.side {
            Side::Front => json!({
                "value": value,
                "place": problem.place.multiplier,
                "placeName": name,
            }),
            Side::Back => json!({
                "value": value,
                "place": problem.place.multiplier,
                "placeName": name,
                "answer": rounded,
            }),
        };
        Ok(GenerationResult {
            html: question_card(request.side, &question, &format!("The answer is: {rounded}")),
            data,
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let problem = match draw(request) {
            Ok(problem) => problem,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let mut errors = Vec::new();
        if place_value_name(problem.place.multiplier) == INVALID_PLACE {
            errors.push(format!("unknown place {}", problem.place.multiplier));
        }
        let step = problem.place.step_units();
        let distance = (problem.rounded_units() - problem.units).abs();
        if distance * 2 > step || problem.rounded_units() % step != 0 {
            errors.push(format!(
                "{} is not {} rounded to the nearest {}",
                problem.rounded_text(),
                problem.value_text(),
                problem.place.name
            ));
        }
        Some(ValidationReport::from_findings(errors, Vec::new()))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Rounding to a Place Value",
            &["rounding", "place value"],
            &["3", "4", "5"],
            json!({ "maxValue": DEFAULT_MAX_VALUE, "minRound": DEFAULT_MIN_ROUND }),
        )
        .with_field_bindings(&[("Max", "maxValue"), ("minRound", "minRound")]),
        Rounding,
    )
}
