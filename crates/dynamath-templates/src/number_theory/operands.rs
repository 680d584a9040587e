//! Operand drawing shared by the GCF and LCM templates.

use dynamath_core::error::GenerationError;
use dynamath_core::rng::{RandomStream, int_in_range, pick};

use crate::config::TemplateConfig;

/// Primes used to bias operands toward a shared factor.
pub const SMALL_PRIMES: [i64; 4] = [2, 3, 5, 7];

/// Probability that an attempt builds its operands around a shared prime.
pub const SHARED_PRIME_BIAS: f64 = 0.7;

/// Largest operand a `range` override may ask for. Three operands at this
/// size still have an LCM that fits in a `u64`.
pub const OPERAND_CEILING: i64 = 1_000_000;

/// Inclusive operand bounds for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
    /// Set when the bounds came from an explicit `range` override rather
    /// than a digit length.
    pub explicit: bool,
}

/// Bounds of a `digits`-digit operand. Single-digit operands start at 2.
#[must_use]
pub fn digit_range(digits: i64) -> (i64, i64) {
    match digits {
        1 => (2, 9),
        3 => (100, 999),
        _ => (10, 99),
    }
}

/// Reads the `digits` option restricted to `allowed`, or `default` when
/// nothing usable is configured.
#[must_use]
pub fn digit_lengths(config: &TemplateConfig, allowed: &[i64], default: &[i64]) -> Vec<i64> {
    let configured: Vec<i64> = config
        .int_list("digits")
        .unwrap_or_default()
        .into_iter()
        .filter(|d| allowed.contains(d))
        .collect();
    if configured.is_empty() {
        default.to_vec()
    } else {
        configured
    }
}

/// Resolves bounds for a drawn digit length, honouring a `range: {min,
/// max}` override when it describes a non-empty range of values >= 2.
/// The override's `max` is clamped to [`OPERAND_CEILING`]; a `min` above
/// the ceiling discards the override.
#[must_use]
pub fn bounds_for(config: &TemplateConfig, digits: i64) -> Bounds {
    let (base_min, base_max) = digit_range(digits);
    if let Some(range) = config.section("range") {
        let min = range
            .int("min")
            .filter(|n| *n != 0)
            .unwrap_or(base_min)
            .max(2);
        let max = range
            .int("max")
            .filter(|n| *n != 0)
            .unwrap_or(base_max)
            .min(OPERAND_CEILING);
        if max >= min {
            return Bounds {
                min,
                max,
                explicit: true,
            };
        }
    }
    Bounds {
        min: base_min,
        max: base_max,
        explicit: false,
    }
}

/// Draws a uniform multiple of `prime` in `[min, max]`, or `None` when the
/// range holds no multiple.
///
/// # Errors
///
/// Propagates `GenerationError` from the stream helpers.
pub fn pick_multiple_of<S: RandomStream + ?Sized>(
    rng: &mut S,
    prime: i64,
    min: i64,
    max: i64,
) -> Result<Option<i64>, GenerationError> {
    let first = (min + prime - 1).div_euclid(prime) * prime;
    if first > max {
        return Ok(None);
    }
    let count = (max - first) / prime + 1;
    let offset = int_in_range(rng, 0, count - 1)?;
    Ok(Some(first + offset * prime))
}

/// Draws one operand in `[min, max]`, a multiple of `prime` when one is
/// given and the range allows it. Results are clamped to at least 2.
///
/// # Errors
///
/// Propagates `GenerationError` from the stream helpers.
pub fn draw_operand<S: RandomStream + ?Sized>(
    rng: &mut S,
    prime: Option<i64>,
    min: i64,
    max: i64,
) -> Result<u64, GenerationError> {
    let multiple = match prime {
        Some(p) => pick_multiple_of(rng, p, min, max)?,
        None => None,
    };
    let value = match multiple {
        Some(value) => value,
        None => int_in_range(rng, min, max)?,
    };
    Ok(value.max(2).unsigned_abs())
}

/// Picks the shared prime for a biased attempt.
///
/// # Errors
///
/// Propagates `GenerationError` from the stream helpers.
pub fn pick_prime<S: RandomStream + ?Sized>(rng: &mut S) -> Result<i64, GenerationError> {
    pick(rng, &SMALL_PRIMES).copied()
}

/// Returns `true` when no two operands are equal.
#[must_use]
pub fn all_distinct(operands: &[u64]) -> bool {
    operands
        .iter()
        .enumerate()
        .all(|(i, n)| !operands[..i].contains(n))
}

/// Makes every operand unique by moving each duplicate to the nearest free
/// value: upward within `max` first, then downward to 2, then past `max`.
pub fn nudge_unique(operands: &mut [u64], max: u64) {
    for i in 1..operands.len() {
        let (earlier, rest) = operands.split_at_mut(i);
        let current = &mut rest[0];
        if !earlier.contains(current) {
            continue;
        }
        let start = *current;
        let upward = (start + 1..=max.max(start)).find(|n| !earlier.contains(n));
        let downward = || (2..start).rev().find(|n| !earlier.contains(n));
        let beyond = || (max.max(start) + 1..).find(|n| !earlier.contains(n));
        *current = upward
            .or_else(downward)
            .or_else(beyond)
            .unwrap_or(start);
    }
}
