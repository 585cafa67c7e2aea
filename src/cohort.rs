//! Entry cohorts tracked by the pricing simulation

use serde::{Deserialize, Serialize};

/// Number of entry cohorts priced per trial
pub const COHORT_COUNT: usize = 45;

/// Entry age of the youngest cohort
pub const ENTRY_AGE_BASE: usize = 20;

/// Age at which accumulation ends and pension payments begin
pub const RETIREMENT_AGE: usize = 65;

/// One entry cohort: a group entering observation at a fixed age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    /// Cohort index, 0-based
    pub index: usize,

    /// Age at entry (20 + index)
    pub entry_age: usize,
}

impl Cohort {
    /// Create the cohort at the given index
    pub fn new(index: usize) -> Self {
        debug_assert!(index < COHORT_COUNT);
        Self {
            index,
            entry_age: ENTRY_AGE_BASE + index,
        }
    }

    /// Iterate over all cohorts in index order
    pub fn all() -> impl Iterator<Item = Cohort> {
        (0..COHORT_COUNT).map(Cohort::new)
    }

    /// Years from entry until the retirement boundary
    pub fn years_to_retirement(&self) -> usize {
        RETIREMENT_AGE - self.entry_age
    }

    /// Whether a cohort exiting after `exit_year` years survived to the
    /// retirement boundary
    pub fn reaches_retirement(&self, exit_year: u32) -> bool {
        self.entry_age + exit_year as usize >= RETIREMENT_AGE
    }
}
