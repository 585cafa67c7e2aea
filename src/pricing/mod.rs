//! Premium pricing: discount basis, product terms, and the per-cohort
//! benefit / annuity formula

mod discount;
mod premium;
mod product;

pub use discount::DiscountBasis;
pub use premium::{annuity_factor, benefit_value, cohort_premium, CohortPremium};
pub use product::ProductTerms;
