//! Review-seed resolution.
//!
//! A card is rendered twice: the front when it is shown and the back when
//! the learner flips it, in separate execution contexts. Both passes must
//! draw from the same seed. The resolver synthesizes a seed on the front,
//! parks it in the seed store, and consumes it on the back. A user-authored
//! static seed bypasses all of this.
//!
//! The channel is not atomic. A second front render before the matching
//! back overwrites the stored seed, and a back render with no stored seed
//! falls back to a fresh one that will not match the front. That fallback
//! is intentional and logged.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::GenerationError;
use crate::storage::{SelectedStore, StorageTier, storage_key};

/// Which face of the card is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The question face.
    #[default]
    Front,
    /// The answer face.
    Back,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => f.write_str("front"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Raw content of a card's seed field, as supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SeedField<'a> {
    /// No seed field on the card.
    #[default]
    Missing,
    /// Field text, possibly blank or non-numeric.
    Text(&'a str),
    /// A numeric value.
    Number(f64),
}

impl SeedField<'_> {
    /// Interprets the field as a seed, or `None` when it holds no usable
    /// integer.
    ///
    /// Text is trimmed and its leading integer prefix is taken (`"42abc"`
    /// is 42). Values are wrapped into the unsigned 32-bit range, so `"-1"`
    /// becomes `u32::MAX`.
    #[must_use]
    pub fn coerce(&self) -> Option<u32> {
        match *self {
            Self::Missing => None,
            Self::Text(text) => coerce_text(text),
            Self::Number(value) => coerce_number(value),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_number(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc().rem_euclid(4_294_967_296.0) as u32)
}

fn coerce_text(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value: u32 = 0;
    let mut any = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        value = value
            .wrapping_mul(10)
            .wrapping_add(u32::from(byte - b'0'));
    }
    if !any {
        return None;
    }
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Strictly parses a seed: the whole trimmed text must be a decimal `u32`.
///
/// # Errors
///
/// Returns `GenerationError::InvalidSeed` if the text is not a `u32`.
pub fn parse_seed(text: &str) -> Result<u32, GenerationError> {
    text.trim()
        .parse::<u32>()
        .map_err(|e| GenerationError::InvalidSeed(format!("{text:?}: {e}")))
}

/// Abstraction over an optional cryptographic salt mixed into fresh seeds.
pub trait SaltSource: Send + Sync {
    /// Returns a salt, or `None` when no entropy source is available.
    fn salt(&self) -> Option<u32>;
}

/// Salt drawn from the operating system's entropy via `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSalt;

impl SaltSource for OsSalt {
    fn salt(&self) -> Option<u32> {
        Some(rand::random::<u32>())
    }
}

/// Parameters for one seed resolution.
#[derive(Debug, Clone, Copy)]
pub struct SeedRequest<'a> {
    /// Scope of the persisted seed, normally the template id.
    pub template_id: &'a str,
    /// The card's seed field.
    pub seed_field: SeedField<'a>,
    /// Face being rendered.
    pub side: Side,
    /// Share one seed between the front and back of a review.
    pub per_review: bool,
}

impl<'a> SeedRequest<'a> {
    /// Creates a per-review request with no seed field.
    #[must_use]
    pub fn new(template_id: &'a str, side: Side) -> Self {
        Self {
            template_id,
            seed_field: SeedField::Missing,
            side,
            per_review: true,
        }
    }

    /// Sets the seed field.
    #[must_use]
    pub fn with_seed_field(mut self, seed_field: SeedField<'a>) -> Self {
        self.seed_field = seed_field;
        self
    }

    /// Sets the per-review policy.
    #[must_use]
    pub fn with_per_review(mut self, per_review: bool) -> Self {
        self.per_review = per_review;
        self
    }
}

/// Resolves and persists the seed shared by a card's two render passes.
pub struct ReviewSeedResolver {
    store: SelectedStore,
    clock: Arc<dyn Clock>,
    salt: Arc<dyn SaltSource>,
    counter: AtomicU32,
}

impl fmt::Debug for ReviewSeedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewSeedResolver")
            .field("store", &self.store)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl ReviewSeedResolver {
    /// Creates a resolver writing through `store`.
    #[must_use]
    pub fn new(store: SelectedStore, clock: Arc<dyn Clock>, salt: Arc<dyn SaltSource>) -> Self {
        Self {
            store,
            clock,
            salt,
            counter: AtomicU32::new(1),
        }
    }

    /// Returns the tier the resolver persists into.
    #[must_use]
    pub fn tier(&self) -> StorageTier {
        self.store.tier
    }

    /// Resolves the seed for one render pass.
    ///
    /// * A usable seed field wins (static mode) and clears any stale
    ///   per-review seed for the template.
    /// * With `per_review` off, a fresh seed is returned without storage.
    /// * Front: a fresh seed is persisted and returned.
    /// * Back: the persisted seed is consumed; if none exists a fresh,
    ///   unmatched seed is returned.
    ///
    /// Storage failures are logged and never abort the render.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidId` if `template_id` is blank.
    pub fn resolve(&self, request: &SeedRequest<'_>) -> Result<u32, GenerationError> {
        if request.template_id.trim().is_empty() {
            return Err(GenerationError::InvalidId(request.template_id.to_owned()));
        }
        let key = storage_key(request.template_id);

        if let Some(seed) = request.seed_field.coerce() {
            if let Err(e) = self.store.store.remove(&key) {
                warn!(%key, error = %e, "failed to clear per-review seed");
            }
            debug!(template_id = request.template_id, seed, "using static seed");
            return Ok(seed);
        }

        if !request.per_review {
            let seed = self.fresh_seed();
            debug!(template_id = request.template_id, seed, "per-review disabled, fresh seed");
            return Ok(seed);
        }

        match request.side {
            Side::Front => {
                let seed = self.fresh_seed();
                if let Err(e) = self.store.store.set(&key, &seed.to_string()) {
                    warn!(%key, error = %e, "failed to persist per-review seed");
                }
                debug!(template_id = request.template_id, seed, tier = ?self.store.tier, "persisted front seed");
                Ok(seed)
            }
            Side::Back => {
                match self.store.store.get(&key) {
                    Ok(Some(stored)) => {
                        if let Some(seed) = SeedField::Text(&stored).coerce() {
                            if let Err(e) = self.store.store.remove(&key) {
                                warn!(%key, error = %e, "failed to clear consumed seed");
                            }
                            debug!(template_id = request.template_id, seed, "consumed front seed");
                            return Ok(seed);
                        }
                        warn!(%key, value = %stored, "persisted seed is not an integer");
                    }
                    Ok(None) => {}
                    Err(e) => warn!(%key, error = %e, "failed to read per-review seed"),
                }
                let seed = self.fresh_seed();
                warn!(
                    template_id = request.template_id,
                    seed,
                    "no persisted seed for back side; front and back may disagree"
                );
                Ok(seed)
            }
        }
    }

    /// Synthesizes a fresh, non-zero seed from wall-clock time, the
    /// monotonic clock, an internal counter and an optional salt.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fresh_seed(&self) -> u32 {
        let now = self.clock.now().timestamp_millis() as u32;
        let uptime = self.clock.uptime_millis() as u32;
        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        let salt = self.salt.salt().unwrap_or(0);
        match now ^ uptime ^ count ^ salt {
            0 => 1,
            seed => seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_text_plain_integer() {
        assert_eq!(SeedField::Text("123").coerce(), Some(123));
        assert_eq!(SeedField::Text("  77  ").coerce(), Some(77));
    }

    #[test]
    fn test_coerce_text_takes_integer_prefix() {
        assert_eq!(SeedField::Text("42abc").coerce(), Some(42));
        assert_eq!(SeedField::Text("12.9").coerce(), Some(12));
    }

    #[test]
    fn test_coerce_text_rejects_blank_and_non_numeric() {
        assert_eq!(SeedField::Text("").coerce(), None);
        assert_eq!(SeedField::Text("   ").coerce(), None);
        assert_eq!(SeedField::Text("seed").coerce(), None);
        assert_eq!(SeedField::Text("-").coerce(), None);
        assert_eq!(SeedField::Missing.coerce(), None);
    }

    #[test]
    fn test_coerce_wraps_into_u32() {
        assert_eq!(SeedField::Text("-1").coerce(), Some(u32::MAX));
        assert_eq!(SeedField::Text("4294967297").coerce(), Some(1));
        assert_eq!(SeedField::Number(-1.0).coerce(), Some(u32::MAX));
        assert_eq!(SeedField::Number(7.9).coerce(), Some(7));
        assert_eq!(SeedField::Number(f64::NAN).coerce(), None);
        assert_eq!(SeedField::Number(f64::INFINITY).coerce(), None);
    }

    #[test]
    fn test_parse_seed_is_strict() {
        assert_eq!(parse_seed(" 15 "), Ok(15));
        assert!(matches!(
            parse_seed("15x"),
            Err(GenerationError::InvalidSeed(_))
        ));
        assert!(matches!(parse_seed("-3"), Err(GenerationError::InvalidSeed(_))));
    }

    #[test]
    fn test_side_display_and_default() {
        assert_eq!(Side::Back.to_string(), "back");
        assert_eq!(Side::default(), Side::Front);
    }
}
