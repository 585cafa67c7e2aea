//! Cohort trajectory sampler
//!
//! One trial draws a survival path per cohort through the projection
//! window, applies the absorbing-death rule, and reduces each path to the
//! number of years survived.

use rand::Rng;

use crate::cohort::Cohort;
use crate::error::PricingError;
use crate::survival::{SurvivalTable, MAX_TABLE_AGE};

/// Width of the projection window in years
pub const PROJECTION_YEARS: usize = 96;

/// First survival-table column of the projection window
pub const PROJECTION_BASE_COLUMN: usize = 25;

/// One Monte-Carlo sample across all cohorts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    /// Years survived within the projection window, per cohort (0..=96)
    pub exit_years: Vec<u32>,
}

/// Samples cohort trajectories against a fixed survival table
pub struct TrialSampler {
    /// probabilities[cohort][offset]: chance the cohort survives year
    /// `offset` of the projection window
    probabilities: Vec<Vec<f64>>,
}

impl TrialSampler {
    /// Precompute the per-cohort probability rows from the survival table
    ///
    /// Fails fast if the table cannot cover the projection window.
    pub fn new(table: &SurvivalTable) -> Result<Self, PricingError> {
        let min_ages = MAX_TABLE_AGE + 1;
        let min_columns = PROJECTION_BASE_COLUMN + PROJECTION_YEARS;
        if table.num_ages() < min_ages || table.num_columns() < min_columns {
            return Err(PricingError::MalformedTable {
                reason: format!(
                    "table is {}x{}, projection window requires at least {}x{}",
                    table.num_ages(),
                    table.num_columns(),
                    min_ages,
                    min_columns
                ),
            });
        }

        let probabilities = Cohort::all()
            .map(|cohort| {
                (0..PROJECTION_YEARS)
                    .map(|k| {
                        let age = (cohort.entry_age + k).min(MAX_TABLE_AGE);
                        table.survival(age, PROJECTION_BASE_COLUMN + k)
                    })
                    .collect()
            })
            .collect();

        Ok(Self { probabilities })
    }

    /// Sample one trial: fresh, independent draws for every cohort-year cell
    pub fn sample_trial(&self, rng: &mut impl Rng) -> Trial {
        let exit_years = self
            .probabilities
            .iter()
            .map(|row| {
                let path = sample_path(row, rng);
                path.iter().filter(|&&alive| alive).count() as u32
            })
            .collect();

        Trial { exit_years }
    }
}

/// Draw a survival path against one probability row, truncated at the
/// first death
fn sample_path(probabilities: &[f64], rng: &mut impl Rng) -> Vec<bool> {
    let mut path: Vec<bool> = probabilities
        .iter()
        .map(|&p| rng.gen::<f64>() < p)
        .collect();
    truncate_after_death(&mut path);
    path
}

/// Death is absorbing: every year from the first death onward is dead
///
/// A path with no death is left untouched.
pub fn truncate_after_death(path: &mut [bool]) {
    if let Some(first_death) = path.iter().position(|&alive| !alive) {
        for year in &mut path[first_death..] {
            *year = false;
        }
    }
}
