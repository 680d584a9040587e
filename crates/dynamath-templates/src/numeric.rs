//! Number formatting shared by the generators.

use dynamath_core::rng::gcd;

/// Denominator used when a fraction is not one of the common ones.
const FRACTION_PRECISION: u64 = 1_000_000;

/// Fractional parts within this distance of a common fraction print as it.
const FRACTION_TOLERANCE: f64 = 0.0001;

const COMMON_FRACTIONS: [(u64, u64); 14] = [
    (1, 3),
    (2, 3),
    (1, 4),
    (3, 4),
    (1, 5),
    (2, 5),
    (3, 5),
    (4, 5),
    (1, 6),
    (5, 6),
    (1, 8),
    (3, 8),
    (5, 8),
    (7, 8),
];

/// Returns `10^exp` as an integer scale factor.
#[must_use]
pub fn pow10(exp: u32) -> i64 {
    10_i64.pow(exp)
}

/// Formats `units / 10^scale` with exactly `scale` decimals.
///
/// `format_scaled(-1205, 3) == "-1.205"`.
#[must_use]
pub fn format_scaled(units: i64, scale: u32) -> String {
    let sign = if units < 0 { "-" } else { "" };
    let magnitude = units.unsigned_abs();
    if scale == 0 {
        return format!("{sign}{magnitude}");
    }
    let factor = 10_u64.pow(scale);
    let width = scale as usize;
    format!(
        "{sign}{}.{:0width$}",
        magnitude / factor,
        magnitude % factor
    )
}

/// Strips trailing fractional zeros and a dangling decimal point.
#[must_use]
pub fn trim_decimal(text: &str) -> String {
    if !text.contains('.') {
        return text.to_owned();
    }
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// `format_scaled` followed by `trim_decimal`.
#[must_use]
pub fn format_scaled_trimmed(units: i64, scale: u32) -> String {
    trim_decimal(&format_scaled(units, scale))
}

/// Rounds to `places` decimals the way fixed-point printing does, then
/// reads the result back as a float, dropping trailing zeros.
#[must_use]
pub fn round_to_precision_and_trim(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Prints a float without a trailing `.0` and without a negative zero.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.fract() == 0.0 && value.abs() >= 1e21 {
        return format!("{value:e}");
    }
    value.to_string()
}

/// Renders a value as a mixed number: `"3"`, `"1/2"`, `"-1 1/2"`.
///
/// Fractional parts close to a common fraction (thirds, quarters, fifths,
/// sixths, eighths) print as that fraction; anything else is approximated
/// over a millionths denominator and reduced.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn decimal_to_mixed_fraction(value: f64) -> String {
    if !value.is_finite() || value.fract() == 0.0 {
        return format_number(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let mut whole = magnitude.floor() as u64;
    let fractional = magnitude - magnitude.floor();

    let common = COMMON_FRACTIONS.iter().find(|(n, d)| {
        (fractional - *n as f64 / *d as f64).abs() < FRACTION_TOLERANCE
    });
    let (numerator, denominator) = if let Some(&(n, d)) = common {
        (n, d)
    } else {
        let scaled = (fractional * FRACTION_PRECISION as f64).round() as u64;
        if scaled == 0 {
            return format!("{sign}{whole}");
        }
        if scaled == FRACTION_PRECISION {
            whole += 1;
            return format!("{sign}{whole}");
        }
        let divisor = gcd(scaled, FRACTION_PRECISION);
        (scaled / divisor, FRACTION_PRECISION / divisor)
    };

    if whole == 0 {
        format!("{sign}{numerator}/{denominator}")
    } else {
        format!("{sign}{whole} {numerator}/{denominator}")
    }
}
