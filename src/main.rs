use std::path::PathBuf;

use anyhow::{Context, bail};
use log::info;
use mortality_atlas::utils::format::{format_int, format_percent};
use mortality_atlas::{EngineConfig, MortalityEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let (Some(path), Some(iso3)) = (args.next(), args.next()) else {
        bail!("usage: mortality-atlas <dataset> <ISO3> [year]");
    };
    let path = PathBuf::from(path);
    let iso3 = iso3.to_uppercase();

    let config = EngineConfig::default();
    info!("{config}");
    let engine = MortalityEngine::from_path_async(&path, config)
        .await
        .with_context(|| format!("failed to load {}", path.display()))?;

    let year = match args.next() {
        Some(year) => year
            .parse::<i32>()
            .with_context(|| format!("invalid year: {year}"))?,
        None => engine
            .country_series(&iso3)
            .last()
            .map(|point| point.year)
            .or_else(|| engine.year_range().map(|(_, max)| max))
            .context("dataset contains no rows")?,
    };

    println!("{}", engine.country_summary(&iso3, None, year));
    println!();

    if let Some(breakdown) = engine.cause_breakdown(&iso3, None, year) {
        println!("Causes of death in {year}:");
        for (idx, share) in breakdown.shares.iter().enumerate() {
            let marker = if breakdown.top_contributors_end.is_some_and(|end| idx <= end) {
                "*"
            } else {
                " "
            };
            println!(
                "{marker} {:<40} {:>12} {:>8}%",
                share.cause,
                format_int(share.deaths),
                format_percent(share.percent)
            );
        }
        if !breakdown.zero_causes.is_empty() {
            println!("  No deaths recorded: {}", breakdown.zero_causes.join(", "));
        }
        println!();
    }

    println!("{}", engine.trend_narrative(&iso3));
    Ok(())
}
