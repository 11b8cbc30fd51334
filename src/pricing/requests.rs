//! Request DTOs for fare quotes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculators::EstimateOptions;
use super::geo::Coordinate;
use super::models::ServiceType;
use super::PricingError;

/// A named place with coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub coordinates: Coordinate,
}

/// Request to quote a trip
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    pub service_type: String,
    pub pickup_location: Location,
    pub drop_location: Location,
    #[serde(default)]
    pub options: EstimateOptionsRequest,
}

/// Optional trip details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateOptionsRequest {
    #[serde(default)]
    pub loading_required: bool,
    /// Billable hours for packers & movers, 1 to 24
    #[serde(default)]
    pub hours: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<ItemRequest>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// An item to be moved
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub dimensions: Option<DimensionsRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DimensionsRequest {
    #[serde(default)]
    pub length: Option<Decimal>,
    #[serde(default)]
    pub width: Option<Decimal>,
    #[serde(default)]
    pub height: Option<Decimal>,
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> PricingError {
    PricingError::InvalidRequest {
        field: field.into(),
        message: message.into(),
    }
}

fn require_positive(value: Option<Decimal>, field: String) -> Result<(), PricingError> {
    match value {
        Some(v) if v <= Decimal::ZERO => Err(invalid(field, "must be a positive number")),
        _ => Ok(()),
    }
}

impl Location {
    fn validate(&self, field: &str) -> Result<(), PricingError> {
        if self.address.trim().is_empty() {
            return Err(invalid(format!("{}.address", field), "is required"));
        }
        self.coordinates.validate(&format!("{}.coordinates", field))
    }
}

impl EstimateRequest {
    /// Validate the request, returning the parsed service type.
    ///
    /// `now` bounds `options.scheduled_at`, which must not be in the past.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<ServiceType, PricingError> {
        let service_type: ServiceType = self.service_type.parse()?;

        self.pickup_location.validate("pickup_location")?;
        self.drop_location.validate("drop_location")?;

        let options = &self.options;
        if let Some(hours) = options.hours {
            if hours < dec!(1) || hours > dec!(24) {
                return Err(invalid("options.hours", "must be between 1 and 24"));
            }
        }

        for (i, item) in options.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(invalid(format!("options.items.{}.name", i), "is required"));
            }
            require_positive(item.weight, format!("options.items.{}.weight", i))?;
            if let Some(dims) = &item.dimensions {
                let prefix = format!("options.items.{}.dimensions", i);
                require_positive(dims.length, format!("{}.length", prefix))?;
                require_positive(dims.width, format!("{}.width", prefix))?;
                require_positive(dims.height, format!("{}.height", prefix))?;
            }
        }

        if let Some(at) = options.scheduled_at {
            if at < now {
                return Err(invalid("options.scheduled_at", "must not be in the past"));
            }
        }

        Ok(service_type)
    }

    /// Pricing options for this request with the given surge applied
    pub fn estimate_options(&self, surge_multiplier: Option<Decimal>) -> EstimateOptions {
        EstimateOptions {
            loading_required: self.options.loading_required,
            hours: self.options.hours,
            surge_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request_json() -> serde_json::Value {
        serde_json::json!({
            "service_type": "truck",
            "pickup_location": {
                "address": "Connaught Place, New Delhi",
                "coordinates": { "latitude": 28.6139, "longitude": 77.2090 }
            },
            "drop_location": {
                "address": "Rohini, New Delhi",
                "coordinates": { "latitude": 28.7041, "longitude": 77.1025 }
            },
            "options": { "loading_required": true, "hours": 3 }
        })
    }

    fn parse(value: serde_json::Value) -> EstimateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = parse(request_json());
        assert_eq!(req.validate(Utc::now()).unwrap(), ServiceType::Truck);
        assert!(req.options.loading_required);
        assert_eq!(req.options.hours, Some(dec!(3)));
    }

    #[test]
    fn test_options_default_when_missing() {
        let mut value = request_json();
        value.as_object_mut().unwrap().remove("options");
        let req = parse(value);
        assert!(!req.options.loading_required);
        assert!(req.options.hours.is_none());
        assert!(req.validate(Utc::now()).is_ok());
    }

    #[test]
    fn test_unknown_service_type() {
        let mut value = request_json();
        value["service_type"] = "helicopter".into();
        let err = parse(value).validate(Utc::now()).unwrap_err();
        assert!(matches!(err, PricingError::InvalidServiceType(ref v) if v == "helicopter"));
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let mut value = request_json();
        value["drop_location"]["coordinates"]["latitude"] = 95.0.into();
        let err = parse(value).validate(Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidCoordinate { ref field, .. }
                if field == "drop_location.coordinates.latitude"
        ));
    }

    #[test]
    fn test_blank_address() {
        let mut value = request_json();
        value["pickup_location"]["address"] = "  ".into();
        let err = parse(value).validate(Utc::now()).unwrap_err();
        assert!(matches!(err, PricingError::InvalidRequest { ref field, .. } if field == "pickup_location.address"));
    }

    #[test]
    fn test_hours_bounds() {
        for hours in [0, 25] {
            let mut value = request_json();
            value["options"]["hours"] = hours.into();
            let err = parse(value).validate(Utc::now()).unwrap_err();
            assert!(matches!(err, PricingError::InvalidRequest { ref field, .. } if field == "options.hours"));
        }
    }

    #[test]
    fn test_item_validation() {
        let mut value = request_json();
        value["options"]["items"] = serde_json::json!([
            { "name": "Sofa", "weight": 40, "dimensions": { "length": 2, "width": 1 } },
            { "name": "Fridge", "dimensions": { "height": 0 } }
        ]);
        let err = parse(value).validate(Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidRequest { ref field, .. } if field == "options.items.1.dimensions.height"
        ));
    }

    #[test]
    fn test_scheduled_in_past_rejected() {
        let now = Utc::now();
        let mut value = request_json();
        value["options"]["scheduled_at"] = (now - Duration::hours(1)).to_rfc3339().into();
        assert!(parse(value).validate(now).is_err());

        let mut value = request_json();
        value["options"]["scheduled_at"] = (now + Duration::hours(1)).to_rfc3339().into();
        assert!(parse(value).validate(now).is_ok());
    }

    #[test]
    fn test_estimate_options_carries_surge() {
        let req = parse(request_json());
        let options = req.estimate_options(Some(dec!(1.3)));
        assert!(options.loading_required);
        assert_eq!(options.hours, Some(dec!(3)));
        assert_eq!(options.surge_multiplier, Some(dec!(1.3)));
    }
}
