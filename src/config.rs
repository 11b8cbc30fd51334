//! Environment configuration

use chrono::FixedOffset;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::pricing::models::DemandLevel;

/// Runtime settings for the quote service
#[derive(Debug, Clone)]
pub struct Config {
    /// Currency code stamped on quotes
    pub currency: String,
    /// Demand level fed to the surge calculator when quoting
    pub demand_level: DemandLevel,
    /// Offset for reading the hour of day; server local time when `None`
    pub surge_utc_offset: Option<FixedOffset>,
    pub quote_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            demand_level: DemandLevel::Normal,
            surge_utc_offset: None,
            quote_cache_capacity: 10_000,
        }
    }
}

impl Config {
    /// Load from the environment (and `.env`, if present).
    ///
    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let var = |key: &str| {
            let value = lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            if value.is_none() {
                debug!("{key} not set, using default");
            }
            value
        };

        let surge_utc_offset = var("SURGE_UTC_OFFSET_MINUTES").and_then(|raw| {
            let offset = parse::<i32>("SURGE_UTC_OFFSET_MINUTES", &raw)
                .and_then(|minutes| minutes.checked_mul(60))
                .and_then(FixedOffset::east_opt);
            if offset.is_none() {
                warn!("SURGE_UTC_OFFSET_MINUTES {raw:?} out of range, using server local time");
            }
            offset
        });

        Self {
            currency: var("FARE_CURRENCY").unwrap_or(defaults.currency),
            demand_level: var("DEMAND_LEVEL")
                .and_then(|raw| parse("DEMAND_LEVEL", &raw))
                .unwrap_or(defaults.demand_level),
            surge_utc_offset,
            quote_cache_capacity: var("QUOTE_CACHE_CAPACITY")
                .and_then(|raw| parse("QUOTE_CACHE_CAPACITY", &raw))
                .unwrap_or(defaults.quote_cache_capacity),
        }
    }
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Option<T>
where
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| warn!("Invalid {key} value {raw:?}: {e}, using default"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.currency, "INR");
        assert_eq!(config.demand_level, DemandLevel::Normal);
        assert!(config.surge_utc_offset.is_none());
        assert_eq!(config.quote_cache_capacity, 10_000);
    }

    fn lookup(pairs: &[(&str, &str)]) -> Config {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(move |key| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn test_reads_valid_values() {
        let config = lookup(&[
            ("FARE_CURRENCY", "USD"),
            ("DEMAND_LEVEL", "very_high"),
            ("SURGE_UTC_OFFSET_MINUTES", "330"),
            ("QUOTE_CACHE_CAPACITY", "50"),
        ]);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.demand_level, DemandLevel::VeryHigh);
        assert_eq!(config.surge_utc_offset, FixedOffset::east_opt(330 * 60));
        assert_eq!(config.quote_cache_capacity, 50);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = lookup(&[
            ("FARE_CURRENCY", "   "),
            ("DEMAND_LEVEL", "extreme"),
            ("SURGE_UTC_OFFSET_MINUTES", "100000"),
            ("QUOTE_CACHE_CAPACITY", "lots"),
        ]);
        let defaults = Config::default();
        assert_eq!(config.currency, defaults.currency);
        assert_eq!(config.demand_level, defaults.demand_level);
        assert!(config.surge_utc_offset.is_none());
        assert_eq!(config.quote_cache_capacity, defaults.quote_cache_capacity);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse::<u64>("QUOTE_CACHE_CAPACITY", "lots"), None);
        assert_eq!(parse::<i32>("SURGE_UTC_OFFSET_MINUTES", "-300"), Some(-300));
    }
}
