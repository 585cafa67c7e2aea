//! Scenario runner for efficient batch estimations
//!
//! Holds one validated survival table, then allows running many
//! estimations with different seeds or configurations without rebuilding
//! the table.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::error::PricingError;
use crate::simulation::{EstimationResult, PremiumEstimator, SimulationConfig};
use crate::survival::SurvivalTable;

/// Pre-loaded runner for batch premium estimations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(SurvivalTable::default_pricing_basis());
///
/// // Independent replicates, one random stream per seed
/// let results = runner.run_seeds(&[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    table: SurvivalTable,
    base_config: SimulationConfig,
}

impl ScenarioRunner {
    /// Create a runner with the default configuration
    pub fn new(table: SurvivalTable) -> Self {
        Self {
            table,
            base_config: SimulationConfig::default(),
        }
    }

    /// Create a runner with a custom base configuration
    pub fn with_config(table: SurvivalTable, config: SimulationConfig) -> Self {
        Self {
            table,
            base_config: config,
        }
    }

    /// Run a single estimation with a dedicated seeded stream
    pub fn run(&self, seed: u64) -> Result<EstimationResult, PricingError> {
        let estimator = PremiumEstimator::new(&self.table, self.base_config.clone())?;
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        estimator.estimate(&mut rng)
    }

    /// Run independent replicates in parallel
    ///
    /// The table is shared read-only across workers; each seed owns its
    /// random stream, so replicates are reproducible individually.
    pub fn run_seeds(&self, seeds: &[u64]) -> Vec<Result<EstimationResult, PricingError>> {
        seeds.par_iter().map(|&seed| self.run(seed)).collect()
    }

    /// Run one estimation per configuration with the same seed
    /// (sensitivity analysis)
    pub fn run_configs(
        &self,
        seed: u64,
        configs: &[SimulationConfig],
    ) -> Vec<Result<EstimationResult, PricingError>> {
        configs
            .iter()
            .map(|config| {
                let estimator = PremiumEstimator::new(&self.table, config.clone())?;
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                estimator.estimate(&mut rng)
            })
            .collect()
    }

    /// Get a reference to the survival table
    pub fn table(&self) -> &SurvivalTable {
        &self.table
    }

    /// Get the base configuration for inspection/modification
    pub fn config(&self) -> &SimulationConfig {
        &self.base_config
    }

    /// Get a mutable reference to the base configuration
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_runner() -> ScenarioRunner {
        // Relaxed tolerance keeps test runs to a handful of trials
        let config = SimulationConfig {
            tolerance: 10_000.0,
            ..Default::default()
        };
        ScenarioRunner::with_config(SurvivalTable::default_pricing_basis(), config)
    }

    #[test]
    fn test_run_seeds_batch() {
        let runner = quick_runner();
        let results = runner.run_seeds(&[1, 2, 3]);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn test_same_seed_same_result_across_calls() {
        let runner = quick_runner();
        let first = runner.run(42).unwrap();
        let second = runner.run(42).unwrap();

        assert_eq!(first.num_trials(), second.num_trials());
        for (a, b) in first.trials.iter().zip(&second.trials) {
            assert_eq!(a.premiums, b.premiums);
        }
    }

    #[test]
    fn test_run_configs_one_result_per_config() {
        let runner = quick_runner();
        let configs = vec![runner.config().clone(), runner.config().clone()];

        let results = runner.run_configs(7, &configs);
        assert_eq!(results.len(), 2);

        // Identical configs and seed: identical histories
        let a = results[0].as_ref().unwrap();
        let b = results[1].as_ref().unwrap();
        assert_eq!(a.num_trials(), b.num_trials());
    }
}
