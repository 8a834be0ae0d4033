//! Country lookup with fallback tiers
//!
//! Map features and dataset rows do not always agree on ISO3 codes, so a
//! lookup falls back from the code to the exact name and finally to a
//! case-insensitive substring match on the name.

use crate::config::PartialMatch;
use crate::models::{MatchTier, MortalityRow};

/// Find the rows of one country among the rows of one year
///
/// # Arguments
/// * `year_rows` - Rows of a single year
/// * `iso3` - ISO3 code to look up, may be empty
/// * `name` - Country name used by the fallback tiers
///
/// # Returns
/// The tier that matched and the matched rows in input order, or `None`
/// when no tier matched. The substring tier keeps the first matching country.
#[must_use]
pub fn match_country<'a>(
    year_rows: &[&'a MortalityRow],
    iso3: &str,
    name: Option<&str>,
) -> Option<(MatchTier, Vec<&'a MortalityRow>)> {
    match_country_with(year_rows, iso3, name, PartialMatch::FirstCountry)
}

/// `match_country` with an explicit policy for the substring tier
#[must_use]
pub fn match_country_with<'a>(
    year_rows: &[&'a MortalityRow],
    iso3: &str,
    name: Option<&str>,
    partial: PartialMatch,
) -> Option<(MatchTier, Vec<&'a MortalityRow>)> {
    if !iso3.is_empty() {
        let rows = select(year_rows, |r| r.iso3 == iso3);
        if !rows.is_empty() {
            return Some((MatchTier::Iso3, rows));
        }
    }

    let name = name.map(str::trim).filter(|n| !n.is_empty())?;

    let rows = select(year_rows, |r| r.country == name);
    if !rows.is_empty() {
        log::debug!("Matched '{iso3}' by exact country name '{name}'");
        return Some((MatchTier::ExactName, rows));
    }

    let target = name.to_lowercase();
    let rows = match partial {
        PartialMatch::FirstCountry => {
            let first = year_rows.iter().find(|r| partial_match(&r.country, &target))?;
            let country = first.country.as_str();
            log::debug!("Matched '{iso3}' by partial country name '{name}' -> '{country}'");
            select(year_rows, |r| r.country == country)
        }
        PartialMatch::AllCountries => select(year_rows, |r| partial_match(&r.country, &target)),
    };
    (!rows.is_empty()).then_some((MatchTier::PartialName, rows))
}

/// Case-insensitive containment in either direction, never for empty names
#[must_use]
pub fn partial_match(country: &str, target_lower: &str) -> bool {
    if country.is_empty() || target_lower.is_empty() {
        return false;
    }
    let candidate = country.to_lowercase();
    candidate.contains(target_lower) || target_lower.contains(&candidate)
}

fn select<'a>(
    rows: &[&'a MortalityRow],
    predicate: impl Fn(&MortalityRow) -> bool,
) -> Vec<&'a MortalityRow> {
    rows.iter().copied().filter(|r| predicate(r)).collect()
}
