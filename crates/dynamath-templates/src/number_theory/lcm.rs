//! `number_theory/lcm_basic`: least common multiple of two or three
//! distinct numbers under a configurable cap.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{RandomStream, chance, checked_lcm, create_stream, gcd, pick};
use serde_json::json;
use tracing::warn;

use super::operands::{
    SHARED_PRIME_BIAS, all_distinct, bounds_for, digit_lengths, digit_range, draw_operand,
    nudge_unique, pick_prime,
};
use crate::config::TemplateConfig;
use crate::html::inline_card;
use crate::template::{
    GenerationRequest, GenerationResult, Generator, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};

pub const ID: &str = "number_theory/lcm_basic";

const ALLOWED_DIGITS: [i64; 3] = [1, 2, 3];
const DEFAULT_DIGITS: [i64; 2] = [1, 2];
const DEFAULT_CAP: u64 = 5000;
const ATTEMPTS: usize = 40;
const THIRD_SHARES_PRIME: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcmProblem {
    pub operands: Vec<u64>,
    pub lcm: u64,
}

impl LcmProblem {
    /// An LCM too large for a `u64` is recorded as `u64::MAX`, which every
    /// cap rejects.
    fn new(operands: Vec<u64>) -> Self {
        let multiple = operands
            .iter()
            .try_fold(1, |acc, n| checked_lcm(acc, *n))
            .unwrap_or(u64::MAX);
        Self {
            operands,
            lcm: multiple,
        }
    }

    /// Some pair of operands shares a factor.
    #[must_use]
    pub fn has_shared_factor(&self) -> bool {
        let ops = &self.operands;
        (0..ops.len()).any(|i| (i + 1..ops.len()).any(|j| gcd(ops[i], ops[j]) > 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settings {
    count: usize,
    cap: u64,
    non_trivial: bool,
}

impl Settings {
    fn from_config(config: &TemplateConfig) -> Self {
        Self {
            count: if config.int("count") == Some(3) { 3 } else { 2 },
            cap: config
                .int("lcmCap")
                .map_or(DEFAULT_CAP, |cap| cap.max(1).unsigned_abs()),
            non_trivial: config.flag("ensureNonTrivial").unwrap_or(true),
        }
    }
}

/// Draws the operands: up to [`ATTEMPTS`] samples, keeping the first that
/// is pairwise distinct, stays under the cap and (with `ensureNonTrivial`)
/// has a shared factor. With two operands both single-digit while longer
/// lengths are configured, the second is re-rolled at a longer length.
/// Exhausting the attempts keeps the last sample, with duplicates nudged
/// apart.
///
/// # Errors
///
/// Propagates `GenerationError` from the stream helpers.
pub fn generate_operands<S: RandomStream + ?Sized>(
    rng: &mut S,
    config: &TemplateConfig,
) -> Result<LcmProblem, GenerationError> {
    let settings = Settings::from_config(config);
    let lengths = digit_lengths(config, &ALLOWED_DIGITS, &DEFAULT_DIGITS);
    let longer: Vec<i64> = lengths.iter().copied().filter(|d| *d > 1).collect();
    let digits = *pick(rng, &lengths)?;
    let bounds = bounds_for(config, digits);

    let mut last = vec![2, 4];
    for _ in 0..ATTEMPTS {
        let prime = if settings.non_trivial && chance(rng, SHARED_PRIME_BIAS) {
            Some(pick_prime(rng)?)
        } else {
            None
        };
        let mut ops = Vec::with_capacity(settings.count);
        ops.push(draw_operand(rng, prime, bounds.min, bounds.max)?);
        ops.push(draw_operand(rng, prime, bounds.min, bounds.max)?);
        if settings.count == 3 {
            let shared = match prime {
                Some(_) if chance(rng, THIRD_SHARES_PRIME) => prime,
                _ => None,
            };
            ops.push(draw_operand(rng, shared, bounds.min, bounds.max)?);
        }

        if settings.count == 2
            && ops.iter().all(|n| *n < 10)
            && !bounds.explicit
            && !longer.is_empty()
        {
            let (min, max) = digit_range(*pick(rng, &longer)?);
            ops[1] = draw_operand(rng, prime, min, max)?;
        }

        let problem = LcmProblem::new(ops);
        if problem.lcm <= settings.cap
            && all_distinct(&problem.operands)
            && (!settings.non_trivial || problem.has_shared_factor())
        {
            return Ok(problem);
        }
        last = problem.operands;
    }

    let upper = last
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(bounds.max.unsigned_abs());
    nudge_unique(&mut last, upper);
    let problem = LcmProblem::new(last);
    warn!(
        operands = ?problem.operands,
        lcm = problem.lcm,
        cap = settings.cap,
        "lcm attempts exhausted, using last sample"
    );
    Ok(problem)
}

fn draw(request: &GenerationRequest) -> Result<LcmProblem, GenerationError> {
    generate_operands(&mut create_stream(request.seed), &request.config)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LcmBasic;

impl Generator for LcmBasic {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let problem = draw(request)?;
        let list = problem
            .operands
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Ok(GenerationResult {
            html: inline_card(
                request.side,
                &format!("LCM({list})"),
                &problem.lcm.to_string(),
            ),
            data: json!({ "operands": problem.operands, "answer": problem.lcm }),
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Option<ValidationReport> {
        let problem = match draw(request) {
            Ok(problem) => problem,
            Err(e) => return Some(ValidationReport::failure(e)),
        };
        let settings = Settings::from_config(&request.config);
        let mut errors = Vec::new();
        for n in &problem.operands {
            if *n == 0 || problem.lcm % n != 0 {
                errors.push(format!("{n} does not divide {}", problem.lcm));
            }
        }
        if let [a, b] = problem.operands[..] {
            if problem.lcm.checked_mul(gcd(a, b)) != a.checked_mul(b) {
                errors.push(format!("lcm({a}, {b}) * gcd({a}, {b}) != {a} * {b}"));
            }
        }
        if !all_distinct(&problem.operands) {
            errors.push(format!("duplicate operands {:?}", problem.operands));
        }
        let mut warnings = Vec::new();
        if problem.lcm > settings.cap {
            warnings.push("LCM exceeded cap; generation fell back to last sample".to_owned());
        }
        if settings.non_trivial && !problem.has_shared_factor() {
            warnings.push("operands are pairwise coprime".to_owned());
        }
        Some(ValidationReport::from_findings(errors, warnings))
    }
}

#[must_use]
pub fn descriptor() -> TemplateDescriptor {
    TemplateDescriptor::new(
        ID,
        TemplateMeta::new(
            "Least Common Multiple (2-3 numbers)",
            &["number-theory", "lcm", "multiples"],
            &["5", "6"],
            json!({
                "count": 2,
                "digits": DEFAULT_DIGITS,
                "ensureNonTrivial": true,
                "lcmCap": DEFAULT_CAP,
            }),
        ),
        LcmBasic,
    )
}
