//! Customer-facing service descriptions and rate cards.

use super::models::{PricingRule, ServiceType};
use super::responses::{RateCard, RateLine, ServiceInfo};

/// Description of one service type
pub fn service_info(service_type: ServiceType) -> ServiceInfo {
    let (name, description, features, max_weight, estimated_time) = match service_type {
        ServiceType::TwoWheeler => (
            "Two Wheeler",
            "Quick delivery with bikes or scooters",
            vec!["Fast delivery", "Small packages", "City coverage"],
            "10 kg",
            "20-45 mins",
        ),
        ServiceType::Truck => (
            "Truck",
            "Heavy goods transportation",
            vec!["Heavy items", "Furniture", "Loading assistance"],
            "1000 kg",
            "1-3 hours",
        ),
        ServiceType::Intercity => (
            "Intercity",
            "Long distance transportation",
            vec!["Long distance", "Multi-day trips", "Professional drivers"],
            "2000 kg",
            "1-3 days",
        ),
        ServiceType::PackersMovers => (
            "Packers & Movers",
            "Complete home/office relocation",
            vec!["Packing service", "Professional movers", "Insurance coverage"],
            "No limit",
            "4-8 hours",
        ),
    };

    ServiceInfo {
        service_type,
        name,
        description,
        features,
        max_weight,
        estimated_time,
    }
}

/// All offered services, in display order
pub fn service_catalog() -> Vec<ServiceInfo> {
    ServiceType::ALL.into_iter().map(service_info).collect()
}

/// Itemised published rates, derived from the fare rule table
pub fn rate_card(service_type: ServiceType) -> RateCard {
    let rule = PricingRule::for_service(service_type);

    let base_description = match service_type {
        ServiceType::PackersMovers => "Base service charge",
        _ => "Base fare for pickup",
    };
    let per_km_description = match service_type {
        ServiceType::PackersMovers => "Transportation charge per km",
        _ => "Per kilometer charge",
    };

    let mut lines = vec![
        RateLine {
            key: "base_fare",
            amount: rule.base_fare,
            description: base_description,
        },
        RateLine {
            key: "per_km",
            amount: rule.per_km,
            description: per_km_description,
        },
    ];

    // Only two-wheeler time is billed per minute
    if service_type == ServiceType::TwoWheeler {
        if let Some(amount) = rule.per_minute {
            lines.push(RateLine {
                key: "per_minute",
                amount,
                description: "Waiting time charge",
            });
        }
    }

    let optional = [
        (rule.loading_charges, "loading_charges", "Loading/unloading assistance"),
        (rule.driver_allowance, "driver_allowance", "Per day driver allowance"),
        (rule.labor_charges, "labor_charges", "Labor charges for packing/moving"),
        (rule.packing_charges, "packing_charges", "Packing materials and service"),
        (rule.per_hour, "per_hour", "Hourly service charge"),
    ];
    for (amount, key, description) in optional {
        if let Some(amount) = amount {
            lines.push(RateLine {
                key,
                amount,
                description,
            });
        }
    }

    let features = match service_type {
        ServiceType::TwoWheeler => vec!["Instant booking", "Real-time tracking", "Cash/Digital payment"],
        ServiceType::Truck => vec!["Professional drivers", "Loading assistance", "Secure transportation"],
        ServiceType::Intercity => vec!["Long distance expert drivers", "Toll charges included", "24/7 support"],
        ServiceType::PackersMovers => vec![
            "Professional packing",
            "Furniture disassembly/assembly",
            "Insurance coverage available",
        ],
    };

    RateCard {
        service_type,
        lines,
        minimum_fare: rule.minimum_fare,
        maximum_fare: rule.maximum_fare,
        features,
    }
}
