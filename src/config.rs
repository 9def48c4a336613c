//! # Simulation Configuration
//!
//! All knobs of a simulation run: arrival rate, pickup window, tier capacities,
//! polling cadence and the overall time budget.
//!
//! Values come from `KITCHEN_*` environment variables, falling back to defaults:
//!
//! ```bash
//! KITCHEN_RATE_MS=250 KITCHEN_MIN_SECS=2 KITCHEN_MAX_SECS=6 cargo run
//! ```

use crate::kitchen::KitchenError;
use crate::storage::PickupWindow;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const RATE_MS_DEFAULT: u64 = 500;
pub const MIN_PICKUP_SECS_DEFAULT: u64 = 4;
pub const MAX_PICKUP_SECS_DEFAULT: u64 = 8;
pub const HEATER_CAPACITY_DEFAULT: usize = 6;
pub const COOLER_CAPACITY_DEFAULT: usize = 6;
pub const SHELF_CAPACITY_DEFAULT: usize = 12;
pub const POLL_INTERVAL_MS_DEFAULT: u64 = 250;
pub const TIME_BUDGET_SECS_DEFAULT: u64 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Delay between consecutive order arrivals.
    pub rate_ms: u64,
    pub min_pickup_secs: u64,
    pub max_pickup_secs: u64,
    pub heater_capacity: usize,
    pub cooler_capacity: usize,
    pub shelf_capacity: usize,
    /// Retry cadence for pickups that arrive before the window opens.
    pub poll_interval_ms: u64,
    /// Wall-clock budget for the whole run; outstanding pickups are cancelled after it.
    pub time_budget_secs: u64,
    /// JSON file with the order descriptors. `None` uses the built-in sample.
    pub problem_path: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rate_ms: RATE_MS_DEFAULT,
            min_pickup_secs: MIN_PICKUP_SECS_DEFAULT,
            max_pickup_secs: MAX_PICKUP_SECS_DEFAULT,
            heater_capacity: HEATER_CAPACITY_DEFAULT,
            cooler_capacity: COOLER_CAPACITY_DEFAULT,
            shelf_capacity: SHELF_CAPACITY_DEFAULT,
            poll_interval_ms: POLL_INTERVAL_MS_DEFAULT,
            time_budget_secs: TIME_BUDGET_SECS_DEFAULT,
            problem_path: None,
        }
    }
}

impl SimulationConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// `KitchenError::InvalidConfig` when a variable does not parse or the result fails
    /// [`SimulationConfig::validate`].
    pub fn from_env() -> Result<Self, KitchenError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SimulationConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, KitchenError> {
        let defaults = Self::default();
        let config = Self {
            rate_ms: parse_or(&lookup, "KITCHEN_RATE_MS", defaults.rate_ms)?,
            min_pickup_secs: parse_or(&lookup, "KITCHEN_MIN_SECS", defaults.min_pickup_secs)?,
            max_pickup_secs: parse_or(&lookup, "KITCHEN_MAX_SECS", defaults.max_pickup_secs)?,
            heater_capacity: parse_or(&lookup, "KITCHEN_HEATER_CAPACITY", defaults.heater_capacity)?,
            cooler_capacity: parse_or(&lookup, "KITCHEN_COOLER_CAPACITY", defaults.cooler_capacity)?,
            shelf_capacity: parse_or(&lookup, "KITCHEN_SHELF_CAPACITY", defaults.shelf_capacity)?,
            poll_interval_ms: parse_or(&lookup, "KITCHEN_POLL_MS", defaults.poll_interval_ms)?,
            time_budget_secs: parse_or(&lookup, "KITCHEN_TIME_BUDGET_SECS", defaults.time_budget_secs)?,
            problem_path: lookup("KITCHEN_PROBLEM").filter(|path| !path.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero capacities, an inverted pickup window and a zero poll interval.
    pub fn validate(&self) -> Result<(), KitchenError> {
        let capacities = [
            ("heater_capacity", self.heater_capacity),
            ("cooler_capacity", self.cooler_capacity),
            ("shelf_capacity", self.shelf_capacity),
        ];
        if let Some((name, _)) = capacities.iter().find(|(_, capacity)| *capacity == 0) {
            return Err(KitchenError::InvalidConfig(format!("{name} must be positive")));
        }
        if self.min_pickup_secs > self.max_pickup_secs {
            return Err(KitchenError::InvalidConfig(format!(
                "min_pickup_secs ({}) exceeds max_pickup_secs ({})",
                self.min_pickup_secs, self.max_pickup_secs
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(KitchenError::InvalidConfig("poll_interval_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn pickup_window(&self) -> PickupWindow {
        PickupWindow::new(self.min_pickup_secs as i64, self.max_pickup_secs as i64)
    }

    pub fn rate(&self) -> Duration {
        Duration::from_millis(self.rate_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(self.time_budget_secs)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, KitchenError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| KitchenError::InvalidConfig(format!("{key}={raw}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SimulationConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.pickup_window(), PickupWindow::new(4, 8));
        assert_eq!(config.rate(), Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = SimulationConfig::from_lookup(lookup_from(&[
            ("KITCHEN_RATE_MS", "100"),
            ("KITCHEN_SHELF_CAPACITY", " 3 "),
            ("KITCHEN_PROBLEM", "orders.json"),
        ]))
        .unwrap();
        assert_eq!(config.rate_ms, 100);
        assert_eq!(config.shelf_capacity, 3);
        assert_eq!(config.problem_path.as_deref(), Some("orders.json"));
    }

    #[test]
    fn test_unparsable_value() {
        let err = SimulationConfig::from_lookup(lookup_from(&[("KITCHEN_MIN_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, KitchenError::InvalidConfig(msg) if msg.contains("KITCHEN_MIN_SECS")));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = SimulationConfig::from_lookup(lookup_from(&[
            ("KITCHEN_MIN_SECS", "9"),
            ("KITCHEN_MAX_SECS", "3"),
        ]))
        .unwrap_err();
        assert!(matches!(err, KitchenError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = SimulationConfig::from_lookup(lookup_from(&[("KITCHEN_HEATER_CAPACITY", "0")])).unwrap_err();
        assert_eq!(err, KitchenError::InvalidConfig("heater_capacity must be positive".into()));
    }

    #[test]
    fn test_deserializes_partial_json() {
        let config: SimulationConfig = serde_json::from_str(r#"{"rate_ms": 50, "shelf_capacity": 2}"#).unwrap();
        assert_eq!(config.rate_ms, 50);
        assert_eq!(config.shelf_capacity, 2);
        assert_eq!(config.heater_capacity, HEATER_CAPACITY_DEFAULT);
    }
}
