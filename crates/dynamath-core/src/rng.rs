//! Seeded random streams and the helpers generators draw through.
//!
//! A stream is a pure function of its seed: the same seed yields the same
//! infinite sequence on every platform. Helpers never hold state of their
//! own; they only advance the stream they are handed, so a generator that
//! replays its draws in the same order reproduces its output exactly.

use crate::error::GenerationError;

/// Abstraction over a seeded source of uniform floats.
pub trait RandomStream {
    /// Advances the stream and returns a float in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// mulberry32: a 32-bit state scrambler. Fast and reproducible, not
/// cryptographically secure.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a stream positioned at the start of `seed`'s sequence.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the stream and returns the raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(1 | t);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(61 | r));
        r ^ (r >> 14)
    }
}

impl RandomStream for Mulberry32 {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Creates the stream for `seed`.
#[must_use]
pub fn create_stream(seed: u32) -> Mulberry32 {
    Mulberry32::new(seed)
}

/// Draws an integer in the inclusive range `[min, max]`.
///
/// # Errors
///
/// Returns `GenerationError::InvalidRange` if `max < min`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn int_in_range<S>(stream: &mut S, min: i64, max: i64) -> Result<i64, GenerationError>
where
    S: RandomStream + ?Sized,
{
    if max < min {
        return Err(GenerationError::InvalidRange { min, max });
    }
    let span = (i128::from(max) - i128::from(min) + 1) as f64;
    let offset = (stream.next_f64() * span).floor() as i64;
    Ok(min + offset)
}

/// Picks one element uniformly from `items`.
///
/// # Errors
///
/// Returns `GenerationError::EmptyInput` if `items` is empty.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn pick<'a, S, T>(stream: &mut S, items: &'a [T]) -> Result<&'a T, GenerationError>
where
    S: RandomStream + ?Sized,
{
    if items.is_empty() {
        return Err(GenerationError::EmptyInput);
    }
    let index = (stream.next_f64() * items.len() as f64).floor() as usize;
    // Guards the float edge where the product rounds up to len.
    Ok(&items[index.min(items.len() - 1)])
}

/// Returns a Fisher-Yates permutation of `items`, leaving the input untouched.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn shuffled<S, T>(stream: &mut S, items: &[T]) -> Vec<T>
where
    S: RandomStream + ?Sized,
    T: Clone,
{
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = ((stream.next_f64() * (i + 1) as f64).floor() as usize).min(i);
        out.swap(i, j);
    }
    out
}

/// Returns `true` with probability `p`.
pub fn chance<S>(stream: &mut S, p: f64) -> bool
where
    S: RandomStream + ?Sized,
{
    stream.next_f64() < p
}

/// Greatest common divisor. `gcd(0, 0) == 0`.
#[must_use]
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Least common multiple. Returns 0 if either operand is 0.
#[must_use]
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Least common multiple, or `None` when it does not fit in a `u64`.
#[must_use]
pub fn checked_lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_matches_reference_sequence() {
        let mut stream = create_stream(123);
        assert_eq!(stream.next_f64(), 0.787_251_623_347_401_6);
        assert_eq!(stream.next_f64(), 0.178_543_565_561_994_9);
        assert_eq!(stream.next_f64(), 0.495_315_514_039_248_23);
    }

    #[test]
    fn test_zero_seed_produces_usable_stream() {
        let mut stream = create_stream(0);
        assert_eq!(stream.next_f64(), 0.266_429_208_684_712_65);
    }

    #[test]
    fn test_same_seed_same_sequence_for_1000_draws() {
        let mut a = create_stream(99_999);
        let mut b = create_stream(99_999);
        for _ in 0..1000 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_different_seeds_diverge_on_first_draw() {
        let mut a = create_stream(123);
        let mut b = create_stream(456);
        assert_ne!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut stream = create_stream(12_345);
        for _ in 0..1000 {
            let value = stream.next_f64();
            assert!((0.0..1.0).contains(&value), "{value} outside [0, 1)");
        }
    }

    #[test]
    fn test_int_in_range_respects_inclusive_bounds() {
        let mut stream = create_stream(42);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let n = int_in_range(&mut stream, 2, 5).unwrap();
            assert!((2..=5).contains(&n));
            seen_min |= n == 2;
            seen_max |= n == 5;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_int_in_range_single_value() {
        let mut stream = create_stream(7);
        assert_eq!(int_in_range(&mut stream, 9, 9).unwrap(), 9);
    }

    #[test]
    fn test_int_in_range_rejects_inverted_bounds() {
        let mut stream = create_stream(7);
        assert_eq!(
            int_in_range(&mut stream, 10, 5),
            Err(GenerationError::InvalidRange { min: 10, max: 5 })
        );
    }

    #[test]
    fn test_pick_returns_member() {
        let mut stream = create_stream(7);
        let items = ["a", "b", "c"];
        let chosen = pick(&mut stream, &items).unwrap();
        assert!(items.contains(chosen));
    }

    #[test]
    fn test_pick_empty_is_error() {
        let mut stream = create_stream(7);
        let items: [u8; 0] = [];
        assert_eq!(pick(&mut stream, &items), Err(GenerationError::EmptyInput));
    }

    #[test]
    fn test_shuffled_is_deterministic_permutation() {
        let items = [1, 2, 3, 4, 5, 6];
        let first = shuffled(&mut create_stream(99), &items);
        let second = shuffled(&mut create_stream(99), &items);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_gcd_and_lcm() {
        assert_eq!(gcd(54, 24), 6);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(lcm(6, 8), 24);
        assert_eq!(lcm(0, 5), 0);
        assert_eq!(lcm(5, 0), 0);
    }

    #[test]
    fn test_checked_lcm_reports_overflow() {
        assert_eq!(checked_lcm(6, 8), Some(24));
        assert_eq!(checked_lcm(0, 9), Some(0));
        assert_eq!(checked_lcm(u64::MAX, u64::MAX - 1), None);
    }
}
