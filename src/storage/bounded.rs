//! # Bounded Store
//!
//! A capacity-limited container of orders keyed by id. The heater and the cooler are
//! plain `BoundedStore`s; the shelf wraps one (see [`OverflowShelf`](super::OverflowShelf)).
//!
//! Members are kept in insertion order, so every scan is `O(capacity)` and iteration
//! order is stable.

use crate::model::{Order, Tier};
use tracing::debug;

/// Bounds, in whole seconds since placement, within which a pickup succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupWindow {
    pub min_secs: i64,
    pub max_secs: i64,
}

impl PickupWindow {
    pub fn new(min_secs: i64, max_secs: i64) -> Self {
        Self { min_secs, max_secs }
    }

    /// Classifies a resident order that has been in place for `elapsed_secs`.
    fn classify(&self, elapsed_secs: i64) -> PickupOutcome {
        if elapsed_secs > self.max_secs {
            PickupOutcome::Discarded
        } else if elapsed_secs >= self.min_secs {
            PickupOutcome::Picked
        } else {
            PickupOutcome::NotEligible
        }
    }
}

/// Result of a pickup attempt against a single store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// Inside the window; the order was removed.
    Picked,
    /// Past the window; the order was removed as spoiled.
    Discarded,
    /// Too early; the order stays where it is.
    NotEligible,
    /// Not resident in this store.
    Absent,
}

impl PickupOutcome {
    /// True when the order left the store.
    pub fn removed(self) -> bool {
        matches!(self, PickupOutcome::Picked | PickupOutcome::Discarded)
    }
}

/// A capacity-limited keyed container of orders.
#[derive(Debug, Clone)]
pub struct BoundedStore {
    tier: Tier,
    capacity: usize,
    orders: Vec<Order>,
}

impl BoundedStore {
    pub fn new(tier: Tier, capacity: usize) -> Self {
        debug_assert!(capacity > 0, "store capacity must be positive");
        Self {
            tier,
            capacity,
            orders: Vec::with_capacity(capacity),
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Residents in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Adds `order` if there is room.
    ///
    /// # Errors
    /// Hands the order back untouched when the store is full or already holds that id.
    pub fn insert(&mut self, order: Order) -> Result<(), Order> {
        if self.is_full() || self.contains(&order.id) {
            return Err(order);
        }
        debug!(tier = %self.tier, order_id = %order.id, size = self.orders.len() + 1, "Inserted");
        self.orders.push(order);
        Ok(())
    }

    /// Adds `order` if there is room, halving its freshness first.
    ///
    /// Only used when pushing an order into space it does not ideally belong in.
    ///
    /// # Errors
    /// Same as [`BoundedStore::insert`]; a rejected order keeps its freshness.
    pub fn insert_with_decay(&mut self, mut order: Order) -> Result<(), Order> {
        if self.is_full() || self.contains(&order.id) {
            return Err(order);
        }
        order.halve_freshness();
        debug!(tier = %self.tier, order_id = %order.id, freshness = order.freshness(), "Inserted with decay");
        self.orders.push(order);
        Ok(())
    }

    /// Removes the order with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<Order> {
        let position = self.position(id)?;
        Some(self.orders.remove(position))
    }

    /// Resolves a pickup of `id` at `now` (µs) against `window`.
    pub fn try_pickup(&mut self, id: &str, now: i64, window: PickupWindow) -> PickupOutcome {
        let Some(position) = self.position(id) else {
            return PickupOutcome::Absent;
        };
        let elapsed = self.orders[position].elapsed_secs(now);
        let outcome = window.classify(elapsed);
        if outcome.removed() {
            self.orders.remove(position);
        }
        debug!(tier = %self.tier, order_id = %id, elapsed, ?outcome, "Pickup attempt");
        outcome
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.orders.iter().position(|order| order.id == id)
    }
}
