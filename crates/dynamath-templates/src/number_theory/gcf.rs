//! `number_theory/gcf_basic`: greatest common factor of two distinct
//! two- or three-digit numbers.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{RandomStream, chance, create_stream, gcd, pick};
use serde_json::json;
use tracing::warn;

use super::operands::{
    Bounds, SHARED_PRIME_BIAS, bounds_for, digit_lengths, draw_operand, pick_prime,
};
use crate::config::TemplateConfig;
use crate::html::inline_card;
use crate::template::{
    GenerationRequest, GenerationResult, Generator, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "number_theory/gcf_basic";

const DIGITS: [i64; 2] = [2, 3];
const ATTEMPTS: usize = 20;
const INITIAL_PAIR: (u64, u64) = (12, 18);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcfProblem {
    pub a: u64,
    pub b: u64,
    pub gcf: u64,
}

impl GcfProblem {
    fn new(a: u64, b: u64) -> Self {
        Self { a, b, gcf: gcd(a, b) }
    }
}

fn ensure_non_trivial(config: &TemplateConfig) -> bool {
    config.flag("ensureNonTrivial").unwrap_or(true)
}

/// Draws the operand pair: up to [`ATTEMPTS`] samples, most of them built
/// on a shared small prime, keeping the first with distinct operands (and a
/// common factor when `ensureNonTrivial` is on). When every attempt fails
/// the last sample is kept with `b` moved off `a` if they coincide.
///
/// # Errors
///
/// Propagates `GenerationError` from the stream helpers.
pub fn generate_pair<S: RandomStream + ?Sized>(
    rng: &mut S,
    config: &TemplateConfig,
) -> Result<GcfProblem, GenerationError> {
    let lengths = digit_lengths(config, &DIGITS, &DIGITS);
    let digits = *pick(rng, &lengths)?;
    let Bounds { min, max, .. } = bounds_for(config, digits);
    let non_trivial = ensure_non_trivial(config);

    let (mut a, mut b) = INITIAL_PAIR;
    for _ in 0..ATTEMPTS {
        let prime = if non_trivial && chance(rng, SHARED_PRIME_BIAS) {
            Some(pick_prime(rng)?)
        } else {
            None
        };
        a = draw_operand(rng, prime, min, max)?;
        b = draw_operand(rng, prime, min, max)?;
        if a != b && (!non_trivial || gcd(a, b) > 1) {
            return Ok(GcfProblem::new(a, b));
        }
    }

    if a == b {
        let max = max.unsigned_abs();
        b = if b < max || b <= 2 { b + 1 } else { b - 1 };
    }
    warn!(a, b, attempts = ATTEMPTS, "gcf attempts exhausted, using last sample");
    Ok(GcfProblem::new(a, b))
}

fn draw(request: &GenerationRequest) -> Result<GcfProblem, GenerationError> {
    generate_pair(&mut create_stream(request.seed), &request.config)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GcfBasic;

impl Generator for GcfBasic {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let problem = draw(request)?;
        Ok(GenerationResult {
            html: inline_card(
                request.side,
                &format!("GCF({}, {})", problem.a, problem.b),
                &problem.gcf.to_string(),
            ),
            data: json!({ "a": problem.a, "b": problem.b, "answer": problem.gcf }),
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let problem = match draw(request) {
            Ok(problem) => problem,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let GcfProblem { a, b, gcf } = problem;
        let mut errors = Vec::new();
        if gcf == 0 || a % gcf != 0 || b % gcf != 0 {
            errors.push(format!("{gcf} does not divide both {a} and {b}"));
        }
        if a == b {
            errors.push(format!("operands are equal ({a})"));
        }
        let mut warnings = Vec::new();
        if ensure_non_trivial(&request.config) && gcf == 1 {
            warnings.push("gcf is 1 despite ensureNonTrivial bias".to_owned());
        }
        Some(ValidationReport::from_findings(errors, warnings))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Greatest Common Factor (2 numbers)",
            &["number-theory", "gcf", "factors"],
            &["5", "6"],
            json!({ "digits": DIGITS, "ensureNonTrivial": true }),
        ),
        GcfBasic,
    )
}

#[cfg(test)]
mod tests {
    use crate::template::Side;

    use super::*;

    #[test]
    fn test_gcf_divides_both_operands_across_seeds() {
        for seed in 1..=200 {
            let problem = draw(&GenerationRequest::new(seed)).unwrap();
            assert_eq!(problem.a % problem.gcf, 0, "seed {seed}");
            assert_eq!(problem.b % problem.gcf, 0, "seed {seed}");
            assert_ne!(problem.a, problem.b, "seed {seed}");
            assert!((10..=999).contains(&problem.a));
        }
    }

    #[test]
    fn test_bias_yields_non_trivial_gcf() {
        let non_trivial = (1..=50)
            .filter(|seed| draw(&GenerationRequest::new(*seed)).unwrap().gcf > 1)
            .count();
        assert!(non_trivial > 40);
    }

    #[test]
    fn test_three_digit_only() {
        let config = TemplateConfig::new().with("digits", json!([3]));
        for seed in 0..50 {
            let problem = draw(&GenerationRequest::new(seed).with_config(config.clone())).unwrap();
            assert!((100..=999).contains(&problem.a));
            assert!((100..=999).contains(&problem.b));
        }
    }

    #[test]
    fn test_fallback_separates_equal_operands() {
        // A one-value range forces every attempt to draw (50, 50).
        let config = TemplateConfig::new().with("range", json!({ "min": 50, "max": 50 }));
        let problem = draw(&GenerationRequest::new(4).with_config(config)).unwrap();
        assert_eq!((problem.a, problem.b), (50, 49));
        assert_eq!(problem.gcf, 1);
    }

    #[test]
    fn test_range_at_integer_limit_falls_back_to_digits() {
        let config = TemplateConfig::new().with(
            "range",
            json!({ "min": "9223372036854775807", "max": "9223372036854775807" }),
        );
        for seed in 0..20 {
            let request = GenerationRequest::new(seed).with_config(config.clone());
            let problem = draw(&request).unwrap();
            assert!((10..=999).contains(&problem.a), "seed {seed}");
            assert!((10..=999).contains(&problem.b), "seed {seed}");
            assert!(GcfBasic.validate(&request).unwrap().ok);
        }
    }

    #[test]
    fn test_oversized_range_is_clamped() {
        let config = TemplateConfig::new().with("range", json!({ "min": 2, "max": i64::MAX }));
        for seed in 0..20 {
            let problem = draw(&GenerationRequest::new(seed).with_config(config.clone())).unwrap();
            assert!(problem.a <= 1_000_000 && problem.b <= 1_000_000, "seed {seed}");
            assert_eq!(problem.a % problem.gcf, 0);
        }
    }

    #[test]
    fn test_front_and_back_html() {
        let front = GcfBasic.generate(&GenerationRequest::new(7)).unwrap();
        let back = GcfBasic
            .generate(&GenerationRequest::new(7).with_side(Side::Back))
            .unwrap();
        assert_eq!(front.data, back.data);
        let (a, b, g) = (&back.data["a"], &back.data["b"], &back.data["answer"]);
        assert_eq!(front.html, format!(r#"<div class="q">GCF({a}, {b}) = ?</div>"#));
        assert_eq!(back.html, format!(r#"<div class="q">GCF({a}, {b}) = <b>{g}</b></div>"#));
    }
}
