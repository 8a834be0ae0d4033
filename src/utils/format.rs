//! `en-US` number formatting
//!
//! Thousands are grouped with `,` and the fraction is rounded half away from
//! zero to at most `max_fraction` digits, keeping at least `min_fraction`.

/// Format a number with grouped thousands and a bounded fraction
///
/// # Arguments
/// * `value` - Number to format
/// * `min_fraction` - Fraction digits always shown
/// * `max_fraction` - Fraction digits shown at most
#[must_use]
pub fn format_grouped(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let max_fraction = max_fraction.max(min_fraction);
    let scale = 10f64.powi(i32::try_from(max_fraction).unwrap_or(i32::MAX));
    let scaled = (value.abs() * scale).round();
    let integer = (scaled / scale).trunc();
    let fraction = (scaled - integer * scale).round();

    let mut out = String::new();
    if value < 0.0 && scaled > 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(&format!("{integer:.0}")));

    if max_fraction > 0 {
        let digits = format!("{:0width$.0}", fraction, width = max_fraction);
        let keep = digits.trim_end_matches('0').len().max(min_fraction);
        if keep > 0 {
            out.push('.');
            out.push_str(&digits[..keep]);
        }
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Integer-style count, up to three fraction digits
#[must_use]
pub fn format_int(value: f64) -> String {
    format_grouped(value, 0, 3)
}

/// Rate with exactly one fraction digit
#[must_use]
pub fn format_rate(value: f64) -> String {
    format_grouped(value, 1, 1)
}

/// Percentage with exactly two fraction digits
#[must_use]
pub fn format_percent(value: f64) -> String {
    format_grouped(value, 2, 2)
}

/// Signed percentage with one fraction digit, e.g. `+12.5%`
#[must_use]
pub fn format_signed_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}
