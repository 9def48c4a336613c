use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Microseconds in one second. All elapsed-time math divides by this.
pub const MICROS_PER_SEC: i64 = 1_000_000;

/// Temperature class of an order.
///
/// Decides the order's ideal storage tier (see [`Temperature::ideal_tier`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Hot,
    Cold,
    Room,
}

impl Temperature {
    /// The storage tier that matches this temperature class.
    pub fn ideal_tier(self) -> Tier {
        match self {
            Temperature::Hot => Tier::Heater,
            Temperature::Cold => Tier::Cooler,
            Temperature::Room => Tier::Shelf,
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Room => "room",
        };
        f.write_str(name)
    }
}

/// One of the three storage areas of the kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Heater,
    Cooler,
    Shelf,
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Heater => "heater",
            Tier::Cooler => "cooler",
            Tier::Shelf => "shelf",
        };
        f.write_str(name)
    }
}

/// Payload describing an order as it arrives from the problem source.
///
/// This is the wire shape: `{"id": "..", "name": "..", "temp": "hot", "freshness": 120}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDescriptor {
    pub id: String,
    pub name: String,
    pub temp: Temperature,
    /// Shelf life in seconds.
    pub freshness: u32,
}

/// An order resident in (or on its way into) the kitchen.
///
/// Identity (`id`, `name`, `temperature`, `initial_freshness`) never changes.
/// `freshness` and `placed_at` are only mutated by the
/// [`OrderManager`](crate::kitchen::OrderManager) while it places or relocates the order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub temperature: Temperature,
    pub initial_freshness: u32,
    freshness: u32,
    placed_at: i64,
}

impl Order {
    /// Creates a new Order instance.
    ///
    /// # Arguments
    /// * `id` - Unique order identifier
    /// * `name` - Dish name
    /// * `temperature` - Temperature class
    /// * `freshness` - Shelf life in seconds
    /// * `placed_at` - Arrival timestamp in microseconds since the Unix epoch
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        temperature: Temperature,
        freshness: u32,
        placed_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            temperature,
            initial_freshness: freshness,
            freshness,
            placed_at,
        }
    }

    /// Builds an order from its wire descriptor, arriving at `now` (µs).
    pub fn arrive(descriptor: OrderDescriptor, now: i64) -> Self {
        Self::new(
            descriptor.id,
            descriptor.name,
            descriptor.temp,
            descriptor.freshness,
            now,
        )
    }

    /// Current freshness budget, in seconds.
    pub fn freshness(&self) -> u32 {
        self.freshness
    }

    /// Timestamp (µs) of the most recent insertion into a store.
    pub fn placed_at(&self) -> i64 {
        self.placed_at
    }

    /// Whole seconds elapsed since the order was last placed.
    pub fn elapsed_secs(&self, now: i64) -> i64 {
        (now - self.placed_at) / MICROS_PER_SEC
    }

    /// Freshness left at `now`; zero or below means spoiled.
    pub fn remaining_freshness(&self, now: i64) -> i64 {
        i64::from(self.freshness) - self.elapsed_secs(now)
    }

    pub(crate) fn stamp(&mut self, now: i64) {
        self.placed_at = now;
    }

    pub(crate) fn halve_freshness(&mut self) {
        self.freshness /= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_deserializes_lowercase_temp() {
        let json = r#"{"id":"a1","name":"Pizza","temp":"hot","freshness":120}"#;
        let descriptor: OrderDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.temp, Temperature::Hot);

        let order = Order::arrive(descriptor, 5 * MICROS_PER_SEC);
        assert_eq!(order.freshness(), 120);
        assert_eq!(order.initial_freshness, 120);
        assert_eq!(order.placed_at(), 5 * MICROS_PER_SEC);
    }

    #[test]
    fn test_remaining_freshness_never_increases() {
        let order = Order::new("a1", "Soup", Temperature::Cold, 10, 0);
        let mut previous = order.remaining_freshness(0);
        for secs in 1..20 {
            let remaining = order.remaining_freshness(secs * MICROS_PER_SEC + 1);
            assert!(remaining <= previous);
            previous = remaining;
        }
        assert_eq!(order.remaining_freshness(12 * MICROS_PER_SEC), -2);
    }

    #[test]
    fn test_elapsed_uses_whole_seconds() {
        let order = Order::new("a1", "Soup", Temperature::Cold, 10, 0);
        assert_eq!(order.elapsed_secs(MICROS_PER_SEC - 1), 0);
        assert_eq!(order.elapsed_secs(MICROS_PER_SEC), 1);
    }

    #[test]
    fn test_halving_compounds() {
        let mut order = Order::new("a1", "Salad", Temperature::Room, 45, 0);
        order.halve_freshness();
        assert_eq!(order.freshness(), 22);
        order.halve_freshness();
        assert_eq!(order.freshness(), 11);
        assert_eq!(order.initial_freshness, 45);
    }

    #[test]
    fn test_ideal_tiers() {
        assert_eq!(Temperature::Hot.ideal_tier(), Tier::Heater);
        assert_eq!(Temperature::Cold.ideal_tier(), Tier::Cooler);
        assert_eq!(Temperature::Room.ideal_tier(), Tier::Shelf);
    }
}
