//! Fare estimation engine.
//!
//! Distance, rule table, estimate, travel time and surge calculations,
//! plus the quote service that wraps them for booking callers.

pub mod calculators;
pub mod catalog;
pub mod geo;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{calculate_estimate, estimated_time, round_money, surge_multiplier, EstimateOptions};
pub use geo::{distance_km, Coordinate};
pub use models::{DemandLevel, PricingRule, ServiceType};
pub use responses::{Estimate, EstimatedTime, PricingBreakdown, QuoteResponse};
pub use services::{PricingError, QuoteService};
