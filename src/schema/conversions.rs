//! Field coercion from raw values to typed values.
//!
//! Every function returns the coerced value together with the reason a
//! coercion was needed, if any. A `None` reason means the raw value was
//! already well formed.

use crate::models::RawField;

/// Reason attached to a coerced field
pub type CoercionReason = &'static str;

pub(crate) const MISSING: CoercionReason = "is missing";
pub(crate) const UNPARSEABLE: CoercionReason = "is not a number";
pub(crate) const NEGATIVE: CoercionReason = "is negative";
pub(crate) const NON_FINITE: CoercionReason = "is not finite";
pub(crate) const FRACTIONAL: CoercionReason = "is not a whole year";
pub(crate) const OUT_OF_RANGE: CoercionReason = "is out of range";

/// Parse a raw field into a float without any clamping
///
/// Text is trimmed first; an empty string counts as missing. Thousands
/// separators are not accepted.
#[must_use]
pub fn parse_number(field: Option<&RawField>) -> Result<f64, CoercionReason> {
    match field {
        None => Err(MISSING),
        Some(RawField::Number(n)) => Ok(*n),
        Some(RawField::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(MISSING)
            } else {
                trimmed.parse::<f64>().map_err(|_| UNPARSEABLE)
            }
        }
        Some(RawField::Flag(_)) => Err(UNPARSEABLE),
    }
}

/// Coerce a count (deaths, population): defaults to 0, never negative
#[must_use]
pub fn coerce_count(field: Option<&RawField>) -> (f64, Option<CoercionReason>) {
    match parse_number(field) {
        Ok(n) if !n.is_finite() => (0.0, Some(NON_FINITE)),
        Ok(n) if n < 0.0 => (0.0, Some(NEGATIVE)),
        Ok(n) => (n, None),
        Err(reason) => (0.0, Some(reason)),
    }
}

/// Coerce a year: defaults to 0, fractions are truncated
#[must_use]
pub fn coerce_year(field: Option<&RawField>) -> (i32, Option<CoercionReason>) {
    match parse_number(field) {
        Ok(n) if !n.is_finite() => (0, Some(NON_FINITE)),
        Ok(n) if n.abs() > f64::from(i32::MAX) => (0, Some(OUT_OF_RANGE)),
        Ok(n) if n.fract() != 0.0 => (n.trunc() as i32, Some(FRACTIONAL)),
        Ok(n) => (n as i32, None),
        Err(reason) => (0, Some(reason)),
    }
}

/// Coerce a label (country, code, cause): defaults to an empty string
#[must_use]
pub fn coerce_text(field: Option<&RawField>) -> (String, Option<CoercionReason>) {
    match field {
        None => (String::new(), Some(MISSING)),
        Some(value) => {
            let text = value.as_text();
            if text.is_empty() {
                (text, Some(MISSING))
            } else {
                (text, None)
            }
        }
    }
}
