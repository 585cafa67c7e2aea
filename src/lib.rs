//! Stochastic Pricing - Monte-Carlo premium engine for retirement products
//!
//! This library provides:
//! - Survival-table construction, validation, and CSV loading
//! - Cohort trajectory sampling with absorbing death
//! - Per-cohort premium pricing (benefit / annuity present values)
//! - An iterative Monte-Carlo estimator with running-mean convergence
//! - Batch scenario running across seeds and configurations

pub mod cohort;
pub mod error;
pub mod pricing;
pub mod scenario;
pub mod simulation;
pub mod survival;

// Re-export commonly used types
pub use cohort::Cohort;
pub use error::PricingError;
pub use pricing::{DiscountBasis, ProductTerms};
pub use scenario::ScenarioRunner;
pub use simulation::{EstimationResult, PremiumEstimator, SimulationConfig, TrialSampler};
pub use survival::SurvivalTable;
