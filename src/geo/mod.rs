//! Join helpers between GeoJSON features and dataset rows
//!
//! Natural Earth style properties carry several three-letter codes, some set
//! to the placeholder `-99`. The first usable one is the join key.

use serde_json::{Map, Value};

/// Placeholder used for unknown codes
const UNKNOWN_CODE: &str = "-99";

/// Name shown for features without a `name` property
pub const UNKNOWN_NAME: &str = "Unknown";

fn usable_code(value: Option<&Value>) -> Option<String> {
    let code = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!code.is_empty() && code != UNKNOWN_CODE).then_some(code)
}

/// Country code from feature properties
///
/// Tries `wb_a3`, then `adm0_a3` when it is exactly three characters, then
/// `iso_a3`. Empty values and `-99` are skipped.
#[must_use]
pub fn country_code(properties: &Map<String, Value>) -> Option<String> {
    usable_code(properties.get("wb_a3"))
        .or_else(|| {
            usable_code(properties.get("adm0_a3")).filter(|code| code.chars().count() == 3)
        })
        .or_else(|| usable_code(properties.get("iso_a3")))
}

/// Country code of a GeoJSON feature
#[must_use]
pub fn feature_country_code(feature: &Value) -> Option<String> {
    feature
        .get("properties")
        .and_then(Value::as_object)
        .and_then(country_code)
}

/// Display name of a GeoJSON feature
#[must_use]
pub fn feature_name(feature: &Value) -> String {
    feature
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}
