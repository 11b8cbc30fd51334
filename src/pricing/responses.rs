//! Output records for fare estimates, quotes and catalog lookups.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{DemandLevel, ServiceType};
use super::requests::Location;

/// Itemised fare. `subtotal` is the fare after surge and clamping, before tax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_fare: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub distance_charges: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub time_charges: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub additional_charges: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub taxes: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub surge_multiplier: Option<Decimal>,
}

/// Travel time estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimatedTime {
    pub minutes: u32,
    pub hours: u32,
    pub display: String,
}

/// Fare estimate for a single trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub service_type: ServiceType,
    /// Kilometers, rounded to 2 decimal places
    pub distance: f64,
    pub estimated_time: EstimatedTime,
    pub pricing: PricingBreakdown,
    pub valid_until: DateTime<Utc>,
}

/// An issued quote: the estimate plus request metadata
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub request_id: String,
    pub currency: String,
    #[serde(flatten)]
    pub estimate: Estimate,
    pub pickup_location: Location,
    pub drop_location: Location,
}

/// Customer-facing description of a service type
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub service_type: ServiceType,
    pub name: &'static str,
    pub description: &'static str,
    pub features: Vec<&'static str>,
    pub max_weight: &'static str,
    pub estimated_time: &'static str,
}

/// One priced item on a rate card
#[derive(Debug, Clone, Serialize)]
pub struct RateLine {
    pub key: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub description: &'static str,
}

/// Published rates for a service type
#[derive(Debug, Clone, Serialize)]
pub struct RateCard {
    pub service_type: ServiceType,
    pub lines: Vec<RateLine>,
    #[serde(with = "rust_decimal::serde::str")]
    pub minimum_fare: Decimal,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub maximum_fare: Option<Decimal>,
    pub features: Vec<&'static str>,
}

/// Surge currently in effect for a service type
#[derive(Debug, Clone, Serialize)]
pub struct SurgeResponse {
    pub service_type: ServiceType,
    #[serde(with = "rust_decimal::serde::str")]
    pub surge_multiplier: Decimal,
    pub demand_level: DemandLevel,
    pub message: String,
    pub last_updated: DateTime<Utc>,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
