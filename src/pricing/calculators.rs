//! Core fare calculation functions.
//!
//! Pure functions for fare math - no I/O. Money is carried as `Decimal`;
//! geometry stays in `f64`.

use chrono::{DateTime, Duration, Timelike, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::geo::{self, Coordinate};
use super::models::{is_late_night, is_peak_hour, DemandLevel, PricingRule, ServiceType};
use super::responses::{Estimate, EstimatedTime, PricingBreakdown};
use super::PricingError;

/// Flat GST rate applied to every fare
pub const TAX_RATE: Decimal = dec!(0.18);

/// How long an estimate stays valid
pub const ESTIMATE_VALIDITY_MINUTES: i64 = 15;

/// Speed assumed when billing two-wheeler riding time.
///
/// Deliberately differs from the 25 km/h used for the displayed travel time.
const TWO_WHEELER_BILLING_SPEED_KMH: Decimal = dec!(20);

/// Kilometers covered per intercity driver-allowance day
const INTERCITY_KM_PER_DAY: Decimal = dec!(500);

const PEAK_HOUR_FACTOR: Decimal = dec!(1.3);
const LATE_NIGHT_FACTOR: Decimal = dec!(1.2);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use fare_engine::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Caller-supplied trip options. Fields a service type doesn't use are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimateOptions {
    /// Truck only: add the loading charge
    pub loading_required: bool,
    /// Packers & movers only: billable hours
    pub hours: Option<Decimal>,
    /// Applied when greater than 1
    pub surge_multiplier: Option<Decimal>,
}

/// Calculate a fare estimate between two points.
///
/// Order of operations matters: surge multiplies the summed fare, then the
/// minimum fare floor applies, then the maximum fare ceiling (which can cancel
/// surge), then tax.
///
/// # Arguments
/// * `service_type` - One of `two-wheeler`, `truck`, `intercity`, `packers-movers`
/// * `pickup` / `drop` - Trip endpoints
/// * `options` - Service-specific options and surge
/// * `as_of` - Computation time for `valid_until` (default: now)
pub fn calculate_estimate(
    service_type: &str,
    pickup: Coordinate,
    drop: Coordinate,
    options: &EstimateOptions,
    as_of: Option<DateTime<Utc>>,
) -> Result<Estimate, PricingError> {
    let service_type: ServiceType = service_type.parse()?;
    pickup.validate("pickup")?;
    drop.validate("drop")?;

    let distance = geo::distance_km(pickup, drop);
    let km = Decimal::from_f64(distance).unwrap_or(Decimal::ZERO);
    let rule = PricingRule::for_service(service_type);

    let base_fare = rule.base_fare;
    let distance_charges = km * rule.per_km;
    let mut time_charges = Decimal::ZERO;
    let mut additional_charges = Decimal::ZERO;

    match service_type {
        ServiceType::TwoWheeler => {
            let minutes = km / TWO_WHEELER_BILLING_SPEED_KMH * dec!(60);
            time_charges = minutes * rule.per_minute.unwrap_or(Decimal::ZERO);
        }
        ServiceType::Truck => {
            if options.loading_required {
                additional_charges += rule.loading_charges.unwrap_or(Decimal::ZERO);
            }
        }
        ServiceType::Intercity => {
            let days = (km / INTERCITY_KM_PER_DAY).ceil();
            additional_charges = days * rule.driver_allowance.unwrap_or(Decimal::ZERO);
        }
        ServiceType::PackersMovers => {
            additional_charges = rule.labor_charges.unwrap_or(Decimal::ZERO)
                + rule.packing_charges.unwrap_or(Decimal::ZERO);
            if let Some(hours) = options.hours {
                additional_charges = hours
                    .checked_mul(rule.per_hour.unwrap_or(Decimal::ZERO))
                    .and_then(|hourly| additional_charges.checked_add(hourly))
                    .ok_or_else(|| out_of_range("options.hours"))?;
            }
        }
    }

    let mut fare = (base_fare + distance_charges + time_charges)
        .checked_add(additional_charges)
        .ok_or_else(|| out_of_range("options.hours"))?;

    let surge_multiplier = options.surge_multiplier.filter(|m| *m > Decimal::ONE);
    if let Some(multiplier) = surge_multiplier {
        fare = fare
            .checked_mul(multiplier)
            .ok_or_else(|| out_of_range("options.surge_multiplier"))?;
    }

    if fare < rule.minimum_fare {
        fare = rule.minimum_fare;
    }
    if let Some(maximum) = rule.maximum_fare {
        if fare > maximum {
            fare = maximum;
        }
    }

    let subtotal = round_money(fare, 2);
    let taxes = round_money(subtotal * TAX_RATE, 2);

    tracing::debug!(
        service_type = %service_type,
        distance_km = distance,
        subtotal = %subtotal,
        surge = ?surge_multiplier,
        "Fare estimate calculated"
    );

    let now = as_of.unwrap_or_else(Utc::now);

    Ok(Estimate {
        service_type,
        distance: (distance * 100.0).round() / 100.0,
        estimated_time: estimated_time(service_type, distance),
        pricing: PricingBreakdown {
            base_fare: round_money(base_fare, 2),
            distance_charges: round_money(distance_charges, 2),
            time_charges: round_money(time_charges, 2),
            additional_charges: round_money(additional_charges, 2),
            subtotal,
            taxes,
            total: subtotal + taxes,
            surge_multiplier,
        },
        valid_until: now + Duration::minutes(ESTIMATE_VALIDITY_MINUTES),
    })
}

fn out_of_range(field: &str) -> PricingError {
    PricingError::InvalidRequest {
        field: field.to_string(),
        message: "value too large to price".to_string(),
    }
}

/// Estimate travel time for display
pub fn estimated_time(service_type: ServiceType, distance_km: f64) -> EstimatedTime {
    let hours_needed = distance_km / service_type.average_speed_kmh();
    let minutes = (hours_needed * 60.0).ceil().max(0.0) as u32;

    EstimatedTime {
        minutes,
        hours: minutes / 60,
        display: format_minutes(minutes),
    }
}

/// Render minutes as "45 mins", "1 hour", "3 hours" or "1h 30m"
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{} mins", minutes);
    }

    let hours = minutes / 60;
    let remaining = minutes % 60;

    if remaining == 0 {
        let unit = if hours == 1 { "hour" } else { "hours" };
        return format!("{} {}", hours, unit);
    }

    format!("{}h {}m", hours, remaining)
}

/// Surge multiplier for a service at a given time of day.
///
/// `at` is read for its hour only, so pass a local (or server) time.
/// The result is always at least 1.0, rounded to 2 decimal places.
pub fn surge_multiplier<T: Timelike>(
    _service_type: ServiceType,
    at: &T,
    demand: DemandLevel,
) -> Decimal {
    let hour = at.hour();
    let mut multiplier = demand.base_multiplier();

    if is_peak_hour(hour) {
        multiplier *= PEAK_HOUR_FACTOR;
    }
    if is_late_night(hour) {
        multiplier *= LATE_NIGHT_FACTOR;
    }

    round_money(multiplier, 2).normalize()
}
