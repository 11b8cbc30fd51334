//! Service types, the static fare rule table and demand levels.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PricingError;

/// Category of transport offering; selects the fare rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    TwoWheeler,
    Truck,
    Intercity,
    PackersMovers,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::TwoWheeler,
        ServiceType::Truck,
        ServiceType::Intercity,
        ServiceType::PackersMovers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::TwoWheeler => "two-wheeler",
            ServiceType::Truck => "truck",
            ServiceType::Intercity => "intercity",
            ServiceType::PackersMovers => "packers-movers",
        }
    }

    /// Average speed in km/h used for the customer-facing travel time
    pub fn average_speed_kmh(&self) -> f64 {
        match self {
            ServiceType::TwoWheeler => 25.0,
            ServiceType::Truck => 40.0,
            ServiceType::Intercity => 60.0,
            ServiceType::PackersMovers => 30.0,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PricingError::InvalidServiceType(s.to_string()))
    }
}

/// Fare parameters for one service type.
///
/// All amounts are in the platform currency unit. Rules are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRule {
    pub base_fare: Decimal,
    pub per_km: Decimal,
    pub per_minute: Option<Decimal>,
    pub per_hour: Option<Decimal>,
    /// Informational only; intercity days are billed through `driver_allowance`
    pub per_day: Option<Decimal>,
    pub minimum_fare: Decimal,
    pub maximum_fare: Option<Decimal>,
    pub loading_charges: Option<Decimal>,
    /// Paid per started 500 km block
    pub driver_allowance: Option<Decimal>,
    pub labor_charges: Option<Decimal>,
    pub packing_charges: Option<Decimal>,
}

static TWO_WHEELER: PricingRule = PricingRule {
    base_fare: dec!(30),
    per_km: dec!(8),
    per_minute: Some(dec!(2)),
    per_hour: None,
    per_day: None,
    minimum_fare: dec!(50),
    maximum_fare: Some(dec!(500)),
    loading_charges: None,
    driver_allowance: None,
    labor_charges: None,
    packing_charges: None,
};

static TRUCK: PricingRule = PricingRule {
    base_fare: dec!(150),
    per_km: dec!(25),
    per_minute: Some(dec!(5)),
    per_hour: None,
    per_day: None,
    minimum_fare: dec!(300),
    maximum_fare: Some(dec!(2000)),
    loading_charges: Some(dec!(100)),
    driver_allowance: None,
    labor_charges: None,
    packing_charges: None,
};

static INTERCITY: PricingRule = PricingRule {
    base_fare: dec!(500),
    per_km: dec!(15),
    per_minute: None,
    per_hour: None,
    per_day: Some(dec!(1000)),
    minimum_fare: dec!(1500),
    maximum_fare: None,
    loading_charges: None,
    driver_allowance: Some(dec!(500)),
    labor_charges: None,
    packing_charges: None,
};

static PACKERS_MOVERS: PricingRule = PricingRule {
    base_fare: dec!(1000),
    per_km: dec!(20),
    per_minute: None,
    per_hour: Some(dec!(200)),
    per_day: None,
    minimum_fare: dec!(2000),
    maximum_fare: None,
    loading_charges: None,
    driver_allowance: None,
    labor_charges: Some(dec!(300)),
    packing_charges: Some(dec!(500)),
};

impl PricingRule {
    /// Rule set for a service type
    pub fn for_service(service_type: ServiceType) -> &'static PricingRule {
        match service_type {
            ServiceType::TwoWheeler => &TWO_WHEELER,
            ServiceType::Truck => &TRUCK,
            ServiceType::Intercity => &INTERCITY,
            ServiceType::PackersMovers => &PACKERS_MOVERS,
        }
    }
}

/// Observed demand, feeding the surge calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    #[default]
    Normal,
    High,
    VeryHigh,
    Peak,
}

impl DemandLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::Normal => "normal",
            DemandLevel::High => "high",
            DemandLevel::VeryHigh => "very_high",
            DemandLevel::Peak => "peak",
        }
    }

    /// Lenient parse: unrecognised levels count as normal demand
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Base surge factor before time-of-day adjustments
    pub fn base_multiplier(&self) -> Decimal {
        match self {
            DemandLevel::Normal => dec!(1.0),
            DemandLevel::High => dec!(1.5),
            DemandLevel::VeryHigh => dec!(2.0),
            DemandLevel::Peak => dec!(2.5),
        }
    }

    /// Demand guess from the hour of day alone.
    ///
    /// Peak commute and late-night hours are treated as high demand.
    pub fn for_hour(hour: u32) -> Self {
        if is_peak_hour(hour) || is_late_night(hour) {
            DemandLevel::High
        } else {
            DemandLevel::Normal
        }
    }
}

impl FromStr for DemandLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(DemandLevel::Normal),
            "high" => Ok(DemandLevel::High),
            "very_high" => Ok(DemandLevel::VeryHigh),
            "peak" => Ok(DemandLevel::Peak),
            other => Err(format!("unknown demand level {:?}", other)),
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 8-10 AM and 6-9 PM, inclusive
pub fn is_peak_hour(hour: u32) -> bool {
    (8..=10).contains(&hour) || (18..=21).contains(&hour)
}

/// 11 PM through 5 AM, inclusive
pub fn is_late_night(hour: u32) -> bool {
    hour >= 23 || hour <= 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_parse() {
        assert_eq!("two-wheeler".parse::<ServiceType>().unwrap(), ServiceType::TwoWheeler);
        assert_eq!("packers-movers".parse::<ServiceType>().unwrap(), ServiceType::PackersMovers);

        let err = "unknown-type".parse::<ServiceType>().unwrap_err();
        assert!(matches!(err, PricingError::InvalidServiceType(ref v) if v == "unknown-type"));
        assert!("Truck".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_service_type_serde_matches_as_str() {
        for t in ServiceType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_rule_table_constants() {
        let rule = PricingRule::for_service(ServiceType::TwoWheeler);
        assert_eq!(rule.base_fare, dec!(30));
        assert_eq!(rule.per_km, dec!(8));
        assert_eq!(rule.per_minute, Some(dec!(2)));
        assert_eq!(rule.minimum_fare, dec!(50));
        assert_eq!(rule.maximum_fare, Some(dec!(500)));

        let rule = PricingRule::for_service(ServiceType::Truck);
        assert_eq!(rule.loading_charges, Some(dec!(100)));
        assert_eq!(rule.maximum_fare, Some(dec!(2000)));

        let rule = PricingRule::for_service(ServiceType::Intercity);
        assert_eq!(rule.driver_allowance, Some(dec!(500)));
        assert_eq!(rule.minimum_fare, dec!(1500));
        assert_eq!(rule.maximum_fare, None);

        let rule = PricingRule::for_service(ServiceType::PackersMovers);
        assert_eq!(rule.per_hour, Some(dec!(200)));
        assert_eq!(rule.labor_charges, Some(dec!(300)));
        assert_eq!(rule.packing_charges, Some(dec!(500)));
        assert_eq!(rule.minimum_fare, dec!(2000));
    }

    #[test]
    fn test_demand_level_parse_lossy() {
        assert_eq!(DemandLevel::parse_lossy("very_high"), DemandLevel::VeryHigh);
        assert_eq!(DemandLevel::parse_lossy(" PEAK "), DemandLevel::Peak);
        assert_eq!(DemandLevel::parse_lossy("extreme"), DemandLevel::Normal);
        assert_eq!(DemandLevel::parse_lossy(""), DemandLevel::Normal);
        assert!("extreme".parse::<DemandLevel>().is_err());
        assert_eq!("High".parse::<DemandLevel>(), Ok(DemandLevel::High));
    }

    #[test]
    fn test_demand_for_hour() {
        assert_eq!(DemandLevel::for_hour(9), DemandLevel::High);
        assert_eq!(DemandLevel::for_hour(2), DemandLevel::High);
        assert_eq!(DemandLevel::for_hour(14), DemandLevel::Normal);
        assert_eq!(DemandLevel::for_hour(22), DemandLevel::Normal);
    }

    #[test]
    fn test_time_windows_are_disjoint() {
        for hour in 0..24 {
            assert!(!(is_peak_hour(hour) && is_late_night(hour)), "hour {}", hour);
        }
    }
}
