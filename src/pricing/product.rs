//! Terms of the priced retirement product

use serde::{Deserialize, Serialize};

/// Benefit amounts of the priced product
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProductTerms {
    /// Lump sum paid when the insured dies before the retirement boundary
    pub death_benefit: f64,

    /// Pension payment amount, paid `payments_per_year` times each year
    /// from retirement through exit
    pub pension_payment: f64,

    /// Monthly-equivalent payments per year (12 plus one bonus payment)
    pub payments_per_year: f64,

    /// Lump sum paid at exit once the insured has reached retirement
    pub retirement_lump_sum: f64,
}

impl ProductTerms {
    /// Total pension paid out per retirement year
    pub fn annual_pension(&self) -> f64 {
        self.pension_payment * self.payments_per_year
    }
}

impl Default for ProductTerms {
    fn default() -> Self {
        Self {
            death_benefit: 5_000_000.0,
            pension_payment: 300_000.0,
            payments_per_year: 13.0,
            retirement_lump_sum: 1_000_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_pension() {
        let terms = ProductTerms::default();
        assert_eq!(terms.annual_pension(), 3_900_000.0);
    }
}
