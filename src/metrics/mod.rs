//! Financial metric calculators over the parsed statement models.
//!
//! All calculators are stateless over a borrowed model: construct one per
//! statement set, call freely, identical inputs give identical outputs.
//! Errors are typed [`CalculationError`](crate::error::CalculationError)
//! values and abort only the call that raised them.

pub mod liquidity;
pub mod margin;
pub mod revenue;

pub use liquidity::LiquidityCalculator;
pub use margin::MarginCalculator;
pub use revenue::{GrowthRecord, RevenueCalculator};
