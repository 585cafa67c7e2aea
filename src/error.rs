//! Error taxonomy for the pricing core

use thiserror::Error;

/// Errors surfaced by table validation and the estimation loop
#[derive(Debug, Error)]
pub enum PricingError {
    /// The survival table cannot support the projection window
    #[error("malformed survival table: {reason}")]
    MalformedTable { reason: String },

    /// The running mean failed to stabilize within the trial cap
    #[error("premium estimate did not converge within {trials} trials")]
    NonConvergence { trials: usize },
}
