//! Discount basis for premium calculations
//!
//! The priced product compounds a technical interest rate with a benefit
//! indexation rate into a single effective annual rate.

use serde::{Deserialize, Serialize};

/// Discount basis: technical rate compounded with indexation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountBasis {
    /// Annual technical interest rate
    pub technical_rate: f64,

    /// Annual benefit indexation rate, compounded with the technical rate
    pub indexation_rate: f64,
}

impl DiscountBasis {
    /// Create a basis from its two component rates
    pub fn new(technical_rate: f64, indexation_rate: f64) -> Self {
        Self {
            technical_rate,
            indexation_rate,
        }
    }

    /// Combined effective annual rate: (1 + i)(1 + g) - 1
    pub fn effective_rate(&self) -> f64 {
        (1.0 + self.technical_rate) * (1.0 + self.indexation_rate) - 1.0
    }

    /// Present-value factor per elapsed year, v = 1 / (1 + j)
    pub fn discount_factor(&self) -> f64 {
        1.0 / (1.0 + self.effective_rate())
    }

    /// Discount factor to year `t`
    pub fn discount_to_year(&self, t: u32) -> f64 {
        self.discount_factor().powi(t as i32)
    }

    /// Annuity-certain with payments at years 0..=last_term: sum of v^k
    pub fn annuity_certain(&self, last_term: u32) -> f64 {
        let v = self.discount_factor();
        if (1.0 - v).abs() < 1e-12 {
            return (last_term + 1) as f64;
        }
        (1.0 - v.powi(last_term as i32 + 1)) / (1.0 - v)
    }
}

impl Default for DiscountBasis {
    /// 4% technical rate with 3% indexation (j = 0.0712)
    fn default() -> Self {
        Self::new(0.04, 0.03)
    }
}
