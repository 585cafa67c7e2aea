//! CSV-based survival table loader
//!
//! Reads `age,rate,rate,...` records, one row per age, ages contiguous
//! from 0 so the row index is the age.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::SurvivalTable;

/// Load a mortality-rate CSV and convert to survival probabilities (1 - qx)
pub fn load_mortality_table(path: &Path) -> Result<SurvivalTable, Box<dyn Error>> {
    let rows = load_rate_rows(path)?;
    Ok(SurvivalTable::from_mortality_rates(rows)?)
}

/// Load a CSV that already contains survival probabilities
pub fn load_survival_table(path: &Path) -> Result<SurvivalTable, Box<dyn Error>> {
    let rows = load_rate_rows(path)?;
    Ok(SurvivalTable::new(rows)?)
}

/// Read the rate grid, ordered and indexed by age
fn load_rate_rows(path: &Path) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows: Vec<(usize, Vec<f64>)> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(format!(
                "record with {} fields, expected an age plus at least one rate",
                record.len()
            )
            .into());
        }
        let age: usize = record[0].trim().parse()?;
        let rates = record
            .iter()
            .skip(1)
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push((age, rates));
    }

    rows.sort_by_key(|(age, _)| *age);
    for (expected, (age, _)) in rows.iter().enumerate() {
        if *age != expected {
            return Err(format!("expected age {expected}, found age {age}").into());
        }
    }

    Ok(rows.into_iter().map(|(_, rates)| rates).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    #[test]
    fn test_load_mortality_table() {
        let path = write_fixture(
            "stochastic_pricing_qx.csv",
            "age,c0,c1\n1,0.2,0.3\n0,0.1,0.2\n",
        );

        let table = load_mortality_table(&path).unwrap();
        assert_eq!(table.num_ages(), 2);
        assert_eq!(table.num_columns(), 2);
        // Rows are sorted by age before indexing
        assert!((table.survival(0, 0) - 0.9).abs() < 1e-12);
        assert!((table.survival(1, 1) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_load_rejects_age_gaps() {
        let path = write_fixture(
            "stochastic_pricing_gap.csv",
            "age,c0\n0,0.1\n2,0.2\n",
        );

        let err = load_mortality_table(&path).unwrap_err();
        assert!(err.to_string().contains("expected age 1"));
    }

    #[test]
    fn test_load_rejects_invalid_probabilities() {
        let path = write_fixture(
            "stochastic_pricing_bad.csv",
            "age,c0\n0,-0.5\n",
        );

        // qx of -0.5 implies survival 1.5, outside [0, 1]
        assert!(load_mortality_table(&path).is_err());
    }
}
