//! Country summary text

use crate::algorithm::aggregation::reduce;
use crate::algorithm::narrative::NO_DATA;
use crate::algorithm::ranking::rank;
use crate::config::TieBreak;
use crate::models::{CountryYearAggregate, MatchTier, Metric, MortalityRow, RankResult};
use crate::utils::format::{format_int, format_percent, format_rate};

/// Global ranks of a country, as shown in the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryRanks {
    /// Rank by total deaths
    pub absolute: Option<RankResult>,
    /// Rank by deaths per 100k
    pub rate: Option<RankResult>,
}

impl SummaryRanks {
    /// Both ranks of `iso3` among every country of a year
    #[must_use]
    pub fn for_country(year_rows: &[&MortalityRow], iso3: &str, tie_break: TieBreak) -> Self {
        Self {
            absolute: rank(year_rows.iter().copied(), iso3, Metric::Absolute, tie_break),
            rate: rank(year_rows.iter().copied(), iso3, Metric::Rate, tie_break),
        }
    }
}

/// Summary of one country and year from its rows
///
/// Ranks are not derived from `rows`, which hold a single country. Build them
/// with `SummaryRanks::for_country` over the whole year, or call
/// `MortalityEngine::country_summary`, which does the lookup and ranking.
///
/// # Arguments
/// * `name` - Display name of the country
/// * `year` - Year the rows belong to
/// * `rows` - Rows of the country for that year
/// * `ranks` - Global ranks, computed by the caller
#[must_use]
pub fn build_country_summary(
    name: &str,
    year: i32,
    rows: &[&MortalityRow],
    ranks: SummaryRanks,
) -> String {
    reduce(rows, year, MatchTier::Iso3).map_or_else(
        || NO_DATA.to_string(),
        |agg| summarize_aggregate(name, &agg, ranks),
    )
}

/// Summary of an aggregate that is already built
#[must_use]
pub fn summarize_aggregate(name: &str, agg: &CountryYearAggregate, ranks: SummaryRanks) -> String {
    let total = agg.total_deaths;
    let population = if agg.population > 0.0 { agg.population } else { 1.0 };
    let rate = total / population * 100_000.0;

    let mut sentences = vec![format!(
        "In {name}, {} deaths were recorded in {}, corresponding to {} deaths per 100,000 people among its {} inhabitants.",
        format_int(total),
        agg.year,
        format_rate(rate),
        format_int(population),
    )];

    match (ranks.absolute, ranks.rate) {
        (Some(absolute), Some(rate)) => sentences.push(format!(
            "Globally, this corresponds to rank {} in total deaths and rank {} in deaths per 100,000 people, out of {} countries with recorded data.",
            absolute.rank, rate.rank, rate.total
        )),
        (Some(absolute), None) => sentences.push(format!(
            "Globally, this corresponds to rank {} in total deaths, out of {} countries with recorded data.",
            absolute.rank, absolute.total
        )),
        (None, Some(rate)) => sentences.push(format!(
            "Globally, this corresponds to rank {} in deaths per 100,000 people, out of {} countries with recorded data.",
            rate.rank, rate.total
        )),
        (None, None) => {}
    }

    let ranked = agg.ranked_causes();
    if let Some(top) = ranked.first() {
        sentences.push(format!(
            "{} was the leading cause at {}% contribution, responsible for {} deaths.",
            top.cause,
            format_percent(agg.cause_percentage(top.deaths)),
            format_int(top.deaths)
        ));
    }
    if let Some(second) = ranked.get(1) {
        sentences.push(format!(
            "The second leading cause was {} at {}% contribution, with {} deaths.",
            second.cause,
            format_percent(agg.cause_percentage(second.deaths)),
            format_int(second.deaths)
        ));
    }
    if let (Some(top), Some(least)) = (ranked.first(), ranked.last()) {
        if least.cause != top.cause {
            sentences.push(format!(
                "At the other end of the spectrum, {} accounted for the fewest deaths, {}.",
                least.cause,
                format_int(least.deaths)
            ));
        }
    }

    sentences.join(" ")
}
