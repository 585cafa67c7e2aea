//! Monte-Carlo simulation: trial sampling and the premium estimator

mod engine;
mod history;
mod sampler;

pub use engine::{PremiumEstimator, SimulationConfig};
pub use history::{EstimationResult, TrialPremiums};
pub use sampler::{
    truncate_after_death, Trial, TrialSampler, PROJECTION_BASE_COLUMN, PROJECTION_YEARS,
};
