//! Quote service: validation, surge injection and quote retention.
//!
//! Wraps the pure calculators with what a booking front end needs:
//! a request id per quote, the surge in effect, and lookup of
//! previously issued quotes while they are still valid.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Timelike, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::QuoteCache;
use crate::config::Config;

use super::calculators::{calculate_estimate, surge_multiplier};
use super::catalog;
use super::models::{DemandLevel, ServiceType};
use super::requests::EstimateRequest;
use super::responses::{PricingErrorResponse, QuoteResponse, RateCard, ServiceInfo, SurgeResponse};

/// Pricing error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid service type: {0}")]
    InvalidServiceType(String),

    #[error("Invalid coordinate {field}: {value}")]
    InvalidCoordinate { field: String, value: f64 },

    #[error("Invalid request field {field}: {message}")]
    InvalidRequest { field: String, message: String },
}

impl PricingError {
    /// Name of the offending input field, when known
    pub fn field(&self) -> Option<&str> {
        match self {
            PricingError::InvalidServiceType(_) => Some("service_type"),
            PricingError::InvalidCoordinate { field, .. }
            | PricingError::InvalidRequest { field, .. } => Some(field),
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidServiceType(_) => "invalid_service_type",
            PricingError::InvalidCoordinate { .. } => "invalid_coordinate",
            PricingError::InvalidRequest { .. } => "invalid_request",
        }
    }
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        PricingErrorResponse {
            error_type: err.error_type().to_string(),
            message: err.to_string(),
            field: err.field().map(str::to_string),
        }
    }
}

/// Issues and remembers fare quotes
#[derive(Clone)]
pub struct QuoteService {
    currency: String,
    demand_level: DemandLevel,
    utc_offset: Option<FixedOffset>,
    cache: QuoteCache,
}

impl QuoteService {
    pub fn new(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            demand_level: config.demand_level,
            utc_offset: config.surge_utc_offset,
            cache: QuoteCache::new(config.quote_cache_capacity),
        }
    }

    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// Wall-clock time used for time-of-day surge rules
    fn local_time(&self, at: DateTime<Utc>) -> NaiveDateTime {
        match self.utc_offset {
            Some(offset) => at.with_timezone(&offset).naive_local(),
            None => at.with_timezone(&Local).naive_local(),
        }
    }

    /// Validate a request, price it with the current surge, and retain the quote.
    ///
    /// # Arguments
    /// * `request` - Parsed estimate request
    /// * `as_of` - Point in time for surge and validity (default: now)
    pub async fn quote(
        &self,
        request: &EstimateRequest,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Arc<QuoteResponse>, PricingError> {
        let now = as_of.unwrap_or_else(Utc::now);

        let service_type = request.validate(now).map_err(|e| {
            tracing::warn!("Rejected estimate request: {}", e);
            e
        })?;

        let surge = surge_multiplier(service_type, &self.local_time(now), self.demand_level);
        let options = request.estimate_options(Some(surge));

        let estimate = calculate_estimate(
            service_type.as_str(),
            request.pickup_location.coordinates,
            request.drop_location.coordinates,
            &options,
            Some(now),
        )?;

        let quote = Arc::new(QuoteResponse {
            request_id: Uuid::new_v4().simple().to_string(),
            currency: self.currency.clone(),
            estimate,
            pickup_location: request.pickup_location.clone(),
            drop_location: request.drop_location.clone(),
        });

        self.cache.insert(quote.clone()).await;

        tracing::info!(
            request_id = %quote.request_id,
            service_type = %service_type,
            total = %quote.estimate.pricing.total,
            "Quote issued"
        );

        Ok(quote)
    }

    /// Look up a previously issued quote that has not yet expired
    pub async fn find_quote(&self, request_id: &str, as_of: Option<DateTime<Utc>>) -> Option<Arc<QuoteResponse>> {
        let now = as_of.unwrap_or_else(Utc::now);
        self.cache.get_valid(request_id, now).await
    }

    /// Surge currently in effect, with demand guessed from the hour of day
    pub fn current_surge(&self, service_type: &str, as_of: Option<DateTime<Utc>>) -> Result<SurgeResponse, PricingError> {
        let service_type: ServiceType = service_type.parse()?;
        let now = as_of.unwrap_or_else(Utc::now);
        let local = self.local_time(now);

        let demand_level = DemandLevel::for_hour(local.hour());
        let multiplier = surge_multiplier(service_type, &local, demand_level);

        let message = if multiplier > Decimal::ONE {
            format!("High demand area - {}x pricing", multiplier)
        } else {
            "Normal pricing".to_string()
        };

        Ok(SurgeResponse {
            service_type,
            surge_multiplier: multiplier,
            demand_level,
            message,
            last_updated: now,
        })
    }

    pub fn service_catalog(&self) -> Vec<ServiceInfo> {
        catalog::service_catalog()
    }

    pub fn rate_card(&self, service_type: &str) -> Result<RateCard, PricingError> {
        Ok(catalog::rate_card(service_type.parse()?))
    }
}
