//! Premium estimator: the Monte-Carlo convergence loop
//!
//! Repeats cohort-trajectory trials until the running grand mean of all
//! accumulated premiums stabilizes within a tolerance, then returns the
//! full trial history.

use log::{debug, info};
use rand::Rng;

use crate::cohort::Cohort;
use crate::error::PricingError;
use crate::pricing::{cohort_premium, DiscountBasis, ProductTerms};
use crate::survival::SurvivalTable;

use super::history::{EstimationResult, TrialPremiums};
use super::sampler::{Trial, TrialSampler};

/// Configuration for an estimation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Convergence tolerance on the running grand mean
    pub tolerance: f64,

    /// Hard cap on the number of trials before giving up
    pub max_trials: usize,

    /// Discount basis for annuity and benefit present values
    pub discount: DiscountBasis,

    /// Benefit amounts of the priced product
    pub product: ProductTerms,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            max_trials: 100_000,
            discount: DiscountBasis::default(),
            product: ProductTerms::default(),
        }
    }
}

/// Main premium estimator
pub struct PremiumEstimator {
    sampler: TrialSampler,
    config: SimulationConfig,
}

impl PremiumEstimator {
    /// Validate the table against the projection window and precompute
    /// the sampler's probability rows
    pub fn new(table: &SurvivalTable, config: SimulationConfig) -> Result<Self, PricingError> {
        Ok(Self {
            sampler: TrialSampler::new(table)?,
            config,
        })
    }

    /// Run trials until the running grand mean stabilizes
    ///
    /// The check compares the grand mean recorded before the newest trial
    /// was appended against the mean including it, so convergence always
    /// lags the newest trial by one iteration. The returned history holds
    /// every trial in generation order, seed trial included.
    pub fn estimate(&self, rng: &mut impl Rng) -> Result<EstimationResult, PricingError> {
        let mut history = EstimationResult::new();
        let seed_trial = self.sampler.sample_trial(rng);
        history.push(self.price_trial(&seed_trial));

        let mut prior_mean = 0.0;
        while (prior_mean - history.grand_mean()).abs() > self.config.tolerance {
            if history.num_trials() >= self.config.max_trials {
                return Err(PricingError::NonConvergence {
                    trials: history.num_trials(),
                });
            }

            prior_mean = history.grand_mean();
            let trial = self.sampler.sample_trial(rng);
            history.push(self.price_trial(&trial));

            debug!(
                "trial {}: grand mean {:.6}",
                history.num_trials(),
                history.grand_mean()
            );
        }

        info!(
            "converged after {} trials, grand mean {:.2}",
            history.num_trials(),
            history.grand_mean()
        );
        Ok(history)
    }

    /// Price every cohort for one sampled trial
    fn price_trial(&self, trial: &Trial) -> TrialPremiums {
        let mut premiums = Vec::with_capacity(trial.exit_years.len());
        let mut degenerate_cohorts = Vec::new();

        for cohort in Cohort::all() {
            let priced = cohort_premium(
                &cohort,
                trial.exit_years[cohort.index],
                &self.config.discount,
                &self.config.product,
            );
            premiums.push(priced.value);
            if priced.degenerate {
                degenerate_cohorts.push(cohort.index);
            }
        }

        TrialPremiums {
            premiums,
            degenerate_cohorts,
        }
    }
}
