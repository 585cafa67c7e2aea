//! Survival table: probability of surviving one more year, by age and
//! calendar column
//!
//! The table is built once (from a loader or the embedded pricing basis)
//! and read-only thereafter. Row lookups beyond the last tracked age clamp
//! to the last valid row.

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// Highest age tracked natively; older lookups clamp to this row
pub const MAX_TABLE_AGE: usize = 115;

/// Immutable 2-D grid of survival probabilities, `rows[age][column]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalTable {
    rows: Vec<Vec<f64>>,
}

impl SurvivalTable {
    /// Create from a prebuilt grid of survival probabilities
    ///
    /// Validates that the grid is non-empty, rectangular, and that every
    /// entry is a probability in [0, 1].
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, PricingError> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(PricingError::MalformedTable {
                    reason: "table has no entries".to_string(),
                })
            }
        };

        for (age, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PricingError::MalformedTable {
                    reason: format!(
                        "row for age {} has {} columns, expected {}",
                        age,
                        row.len(),
                        width
                    ),
                });
            }
            for (column, &p) in row.iter().enumerate() {
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(PricingError::MalformedTable {
                        reason: format!(
                            "entry at age {}, column {} is {} (must lie in [0, 1])",
                            age, column, p
                        ),
                    });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Create from a grid of mortality rates: survival = 1 - qx
    pub fn from_mortality_rates(qx_rows: Vec<Vec<f64>>) -> Result<Self, PricingError> {
        let rows = qx_rows
            .into_iter()
            .map(|row| row.into_iter().map(|q| 1.0 - q).collect())
            .collect();
        Self::new(rows)
    }

    /// Build a grid from a single age-indexed mortality vector, broadcast
    /// across `columns` calendar columns with a flat annual improvement
    /// factor applied per column
    pub fn from_annual_rates(
        qx_by_age: &[f64],
        improvement: f64,
        columns: usize,
    ) -> Result<Self, PricingError> {
        let rows = qx_by_age
            .iter()
            .map(|&q| {
                (0..columns)
                    .map(|column| {
                        let improved = q * (1.0 - improvement).powi(column as i32);
                        (1.0 - improved).clamp(0.0, 1.0)
                    })
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    /// Embedded default pricing basis: Gompertz-Makeham mortality for ages
    /// 0..=115, 121 calendar columns, 1% annual improvement
    ///
    /// Lets binaries and tests run without external assumption files.
    pub fn default_pricing_basis() -> Self {
        Self::from_annual_rates(&Self::makeham_annual_rates(), 0.01, 121)
            .expect("embedded pricing basis is well-formed")
    }

    /// Survival probability for an age and calendar column
    ///
    /// Ages beyond the last row clamp to the last row.
    pub fn survival(&self, age: usize, column: usize) -> f64 {
        let row = &self.rows[age.min(self.rows.len() - 1)];
        row[column]
    }

    /// Number of ages (rows) tracked
    pub fn num_ages(&self) -> usize {
        self.rows.len()
    }

    /// Number of calendar columns per age
    pub fn num_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Gompertz-Makeham annual mortality: qx = A + B * c^x, capped at 1
    fn makeham_annual_rates() -> Vec<f64> {
        const A: f64 = 0.0002;
        const B: f64 = 0.000035;
        const C: f64 = 1.094;

        (0..=MAX_TABLE_AGE)
            .map(|age| (A + B * C.powi(age as i32)).min(1.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_empty_table() {
        assert!(SurvivalTable::new(vec![]).is_err());
        assert!(SurvivalTable::new(vec![vec![]]).is_err());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = SurvivalTable::new(vec![vec![0.9, 0.8], vec![0.7]]).unwrap_err();
        assert!(err.to_string().contains("age 1"));
    }

    #[test]
    fn test_rejects_out_of_range_entries() {
        assert!(SurvivalTable::new(vec![vec![1.2]]).is_err());
        assert!(SurvivalTable::new(vec![vec![-0.1]]).is_err());
        assert!(SurvivalTable::new(vec![vec![f64::NAN]]).is_err());
    }

    #[test]
    fn test_from_mortality_rates() {
        let table = SurvivalTable::from_mortality_rates(vec![vec![0.3, 0.1]]).unwrap();
        assert_relative_eq!(table.survival(0, 0), 0.7);
        assert_relative_eq!(table.survival(0, 1), 0.9);
    }

    #[test]
    fn test_row_lookup_clamps_to_last_age() {
        let table = SurvivalTable::new(vec![vec![0.9], vec![0.5]]).unwrap();
        assert_relative_eq!(table.survival(1, 0), 0.5);
        assert_relative_eq!(table.survival(200, 0), 0.5);
    }

    #[test]
    fn test_broadcast_applies_improvement_per_column() {
        let table = SurvivalTable::from_annual_rates(&[0.1], 0.02, 3).unwrap();
        assert_relative_eq!(table.survival(0, 0), 0.9);
        assert_relative_eq!(table.survival(0, 1), 1.0 - 0.1 * 0.98);
        assert_relative_eq!(table.survival(0, 2), 1.0 - 0.1 * 0.98 * 0.98);
    }

    #[test]
    fn test_default_pricing_basis_dimensions() {
        let table = SurvivalTable::default_pricing_basis();
        assert_eq!(table.num_ages(), MAX_TABLE_AGE + 1);
        assert_eq!(table.num_columns(), 121);
    }

    #[test]
    fn test_default_pricing_basis_mortality_increases_with_age() {
        let table = SurvivalTable::default_pricing_basis();
        // Survival within a column must not increase with age
        for age in 1..=MAX_TABLE_AGE {
            assert!(table.survival(age, 0) <= table.survival(age - 1, 0));
        }
        // Extreme ages approach certain death
        assert!(table.survival(MAX_TABLE_AGE, 0) < 0.2);
        // Working ages survive most years
        assert!(table.survival(30, 0) > 0.99);
    }
}
