use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mortality_atlas::MortalityRow;

pub use mortality_atlas::utils::test::*;

/// Seeded generator so failures can be reproduced
#[must_use]
pub fn test_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random rows for one year
///
/// Every country gets a shared total and population and a few cause rows.
/// Some countries get a zero total or population so they drop out of rankings.
#[must_use]
pub fn random_year_rows(rng: &mut StdRng, year: i32, countries: usize) -> Vec<MortalityRow> {
    let causes = ["Malaria", "Tuberculosis", "Drowning", "Road injuries"];
    let mut rows = Vec::new();
    for idx in 0..countries {
        let iso3 = format!("C{idx:02}");
        let total = if rng.random_bool(0.1) {
            0.0
        } else {
            f64::from(rng.random_range(1..50u32)) * 100.0
        };
        let population = if rng.random_bool(0.1) {
            0.0
        } else {
            f64::from(rng.random_range(1_000..1_000_000u32))
        };
        for cause in &causes[..rng.random_range(1..=causes.len())] {
            let deaths = f64::from(rng.random_range(0..1_000u32));
            rows.push(MortalityRow::new(
                format!("Country {idx}"),
                iso3.clone(),
                year,
                *cause,
                deaths,
                total,
                population,
            ));
        }
    }
    rows
}

/// A fresh empty directory in the system temp directory
pub fn temp_dir() -> mortality_atlas::Result<PathBuf> {
    let dir = temp_dataset_path("d");
    fs::create_dir_all(&dir).map_err(|e| mortality_atlas::MortalityError::io(&dir, e))?;
    Ok(dir)
}

/// Remove a file or directory created by a test, ignoring errors
pub fn cleanup(path: &Path) {
    if path.is_dir() {
        let _ = fs::remove_dir_all(path);
    } else {
        let _ = fs::remove_file(path);
    }
}
