//! Template configuration and host substitution fields.
//!
//! Config values arrive either as JSON from an API caller or as untyped
//! text substituted by the flashcard host. Accessors accept both and never
//! fail: anything missing or malformed reads as `None` and the generator
//! falls back to its default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::template::FieldBinding;

/// Host field carrying the per-card unique identifier.
pub const UNIQUE_ID_FIELD: &str = "UniqueID";

/// Host field carrying an optional static seed.
pub const SEED_FIELD: &str = "Seed";

/// Template-specific options keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateConfig(Map<String, Value>);

impl From<Map<String, Value>> for TemplateConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TemplateConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from a JSON value; anything but an object is empty.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Sets `key`, returning the config for chaining.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_owned(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Reads an integer. Floats truncate toward zero; strings contribute
    /// their leading integer prefix (`"12px"` is 12).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => parse_int_prefix(s),
            _ => None,
        }
    }

    /// Reads a strictly positive integer.
    #[must_use]
    pub fn positive_int(&self, key: &str) -> Option<i64> {
        self.int(key).filter(|n| *n > 0)
    }

    /// Reads a finite float from a number or a numeric string.
    #[must_use]
    pub fn float(&self, key: &str) -> Option<f64> {
        let value = match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        value.is_finite().then_some(value)
    }

    /// Reads a boolean. Strings `"true"`/`"false"` (any case) and the
    /// numbers 1/0 are accepted.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            _ => None,
        }
    }

    /// Reads a list of integers. A bare number or a comma-separated string
    /// is read as a list; malformed entries are dropped.
    #[must_use]
    pub fn int_list(&self, key: &str) -> Option<Vec<i64>> {
        match self.get(key)? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Number(n) => n.as_i64(),
                        Value::String(s) => parse_int_prefix(s),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Number(_) => self.int(key).map(|n| vec![n]),
            Value::String(s) => Some(s.split(',').filter_map(parse_int_prefix).collect()),
            _ => None,
        }
    }

    /// Reads an inclusive `[min, max]` pair, falling back to `default` as a
    /// whole when the configured bounds are inverted.
    #[must_use]
    pub fn int_range(&self, min_key: &str, max_key: &str, default: (i64, i64)) -> (i64, i64) {
        let min = self.int(min_key).unwrap_or(default.0);
        let max = self.int(max_key).unwrap_or(default.1);
        if max < min { default } else { (min, max) }
    }

    /// Reads a trimmed, non-empty string.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Reads a nested object as a config, e.g. `range: {min, max}`.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<TemplateConfig> {
        self.get(key)?.as_object().cloned().map(Self)
    }

    /// Returns a copy with host fields applied over explicit config
    /// through `bindings`. Blank fields are ignored.
    #[must_use]
    pub fn with_fields(&self, fields: &CardFields, bindings: &[FieldBinding]) -> Self {
        let mut merged = self.clone();
        for binding in bindings {
            if let Some(value) = fields.get(&binding.field) {
                merged.insert(&binding.config_key, value);
            }
        }
        merged
    }
}

/// Parses the leading integer of `text` after trimming, with an optional
/// sign. Saturates instead of overflowing.
#[must_use]
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value: i64 = 0;
    let mut any = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }
    any.then_some(if negative { -value } else { value })
}

/// Raw host substitution fields, field name to text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardFields(BTreeMap<String, String>);

impl CardFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.0.insert(field.to_owned(), value.to_owned());
        self
    }

    /// Returns the trimmed field text, or `None` when absent or blank.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// The per-card identifier, if the host supplied one.
    #[must_use]
    pub fn card_id(&self) -> Option<&str> {
        self.get(UNIQUE_ID_FIELD)
    }

    /// The static seed field, if the host supplied one.
    #[must_use]
    pub fn seed(&self) -> Option<&str> {
        self.get(SEED_FIELD)
    }
}
