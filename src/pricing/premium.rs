//! Per-cohort premium calculation
//!
//! Prices one cohort given its simulated exit year:
//! - annuity factor over the accumulation period (premium denominator)
//! - benefit present value at exit (premium numerator)
//!
//! Both are pure functions of (cohort, exit year, discount basis, product
//! terms), independent of trial ordering.

use log::warn;

use crate::cohort::Cohort;

use super::discount::DiscountBasis;
use super::product::ProductTerms;

/// Result of pricing a single cohort for one trial
#[derive(Debug, Clone, Copy)]
pub struct CohortPremium {
    /// Benefit present value over annuity factor
    pub value: f64,

    /// Set when the annuity factor was unusable and the premium was
    /// floored to zero
    pub degenerate: bool,
}

/// Annuity factor over the cohort's accumulation period
///
/// Accumulation runs from entry until the earlier of the retirement
/// boundary and the simulated exit, discounted yearly; the factor always
/// contains the payment at entry (k = 0).
pub fn annuity_factor(cohort: &Cohort, exit_year: u32, discount: &DiscountBasis) -> f64 {
    let horizon = cohort.years_to_retirement() as i64;
    let last_term = (horizon.min(exit_year as i64) - 1).max(0);
    discount.annuity_certain(last_term as u32)
}

/// Present value at entry of the benefit triggered by the cohort's exit
///
/// Exit before the retirement boundary pays a discounted death benefit.
/// Exit at or after the boundary pays the pension from the retirement year
/// through the exit year plus a terminal lump sum at exit.
pub fn benefit_value(
    cohort: &Cohort,
    exit_year: u32,
    discount: &DiscountBasis,
    terms: &ProductTerms,
) -> f64 {
    if !cohort.reaches_retirement(exit_year) {
        return terms.death_benefit * discount.discount_to_year(exit_year);
    }

    let retirement_year = cohort.years_to_retirement() as u32;
    let pension: f64 = (retirement_year..=exit_year)
        .map(|t| terms.annual_pension() * discount.discount_to_year(t))
        .sum();

    pension + terms.retirement_lump_sum * discount.discount_to_year(exit_year)
}

/// Premium for one cohort: benefit over annuity
///
/// The annuity factor always carries its first term, so a non-positive
/// factor can only arise from corrupt inputs; such a cohort prices at zero
/// and is reported through the `degenerate` flag rather than aborting the
/// trial.
pub fn cohort_premium(
    cohort: &Cohort,
    exit_year: u32,
    discount: &DiscountBasis,
    terms: &ProductTerms,
) -> CohortPremium {
    let annuity = annuity_factor(cohort, exit_year, discount);
    if !annuity.is_finite() || annuity <= 0.0 {
        warn!(
            "cohort {} (entry age {}) has degenerate annuity factor {}; premium floored to 0",
            cohort.index, cohort.entry_age, annuity
        );
        return CohortPremium {
            value: 0.0,
            degenerate: true,
        };
    }

    CohortPremium {
        value: benefit_value(cohort, exit_year, discount, terms) / annuity,
        degenerate: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn basis() -> DiscountBasis {
        DiscountBasis::default()
    }

    fn terms() -> ProductTerms {
        ProductTerms::default()
    }

    #[test]
    fn test_death_before_retirement() {
        // Entry age 20, exits after 10 years at age 30
        let cohort = Cohort::new(0);
        let v = basis().discount_factor();

        let ben = benefit_value(&cohort, 10, &basis(), &terms());
        assert_relative_eq!(ben, 5_000_000.0 * v.powi(10), epsilon = 1e-6);

        // Annuity: min(45, 10) - 1 = 9 terms past the first, k = 0..=9
        let an = annuity_factor(&cohort, 10, &basis());
        let expected: f64 = (0..=9).map(|k| v.powi(k)).sum();
        assert_relative_eq!(an, expected, epsilon = 1e-9);

        let premium = cohort_premium(&cohort, 10, &basis(), &terms());
        assert!(!premium.degenerate);
        assert_relative_eq!(premium.value, ben / an, epsilon = 1e-9);
    }

    #[test]
    fn test_immediate_death_prices_full_benefit() {
        // Exit year 0: benefit undiscounted, annuity a single unit term
        for cohort in Cohort::all() {
            let premium = cohort_premium(&cohort, 0, &basis(), &terms());
            assert!(!premium.degenerate);
            assert_relative_eq!(premium.value, 5_000_000.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_retirement_branch() {
        // Entry age 60, exits after 10 years at age 70: pension from year 5
        // (age 65) through year 10, plus the terminal lump sum
        let cohort = Cohort::new(40);
        let v = basis().discount_factor();

        let ben = benefit_value(&cohort, 10, &basis(), &terms());
        let pension: f64 = (5..=10).map(|t| 300_000.0 * 13.0 * v.powi(t)).sum();
        assert_relative_eq!(ben, pension + 1_000_000.0 * v.powi(10), epsilon = 1e-6);

        // Accumulation capped at retirement: min(5, 10) - 1 = 4, k = 0..=4
        let an = annuity_factor(&cohort, 10, &basis());
        let expected: f64 = (0..=4).map(|k| v.powi(k)).sum();
        assert_relative_eq!(an, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_exit_exactly_at_retirement() {
        // Entry age 20 surviving 45 years reaches exactly age 65: a single
        // pension year plus the lump sum
        let cohort = Cohort::new(0);
        let v = basis().discount_factor();

        let ben = benefit_value(&cohort, 45, &basis(), &terms());
        let expected = 300_000.0 * 13.0 * v.powi(45) + 1_000_000.0 * v.powi(45);
        assert_relative_eq!(ben, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_oldest_cohort_single_survived_year() {
        // Entry age 64 with exit year 1 reaches the boundary; the pension
        // range is the single year t = 1 and the annuity is one term
        let cohort = Cohort::new(44);
        let v = basis().discount_factor();

        let an = annuity_factor(&cohort, 1, &basis());
        assert_relative_eq!(an, 1.0);

        let premium = cohort_premium(&cohort, 1, &basis(), &terms());
        let expected = 300_000.0 * 13.0 * v + 1_000_000.0 * v;
        assert_relative_eq!(premium.value, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_premium_is_pure() {
        let cohort = Cohort::new(17);
        let first = cohort_premium(&cohort, 33, &basis(), &terms());
        let second = cohort_premium(&cohort, 33, &basis(), &terms());
        assert_eq!(first.value, second.value);
    }
}
