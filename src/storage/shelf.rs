//! # Overflow Shelf
//!
//! The shelf is the ideal tier for room-temperature orders and the shared overflow
//! space for hot and cold ones. It is a [`BoundedStore`] composed with a
//! [`FreshnessIndex`] that ranks residents by remaining freshness.
//!
//! The ranking is never cached: every query takes an explicit `now` and recomputes
//! `freshness - elapsed_secs` from the resident orders, so it always reflects the
//! clock at the moment of the decision. The index only remembers insertion sequence,
//! which breaks ties between equally fresh orders.

use super::{BoundedStore, PickupOutcome, PickupWindow};
use crate::model::{Order, Temperature, Tier};
use std::collections::HashMap;

/// Insertion-sequence bookkeeping for shelf residents.
#[derive(Debug, Clone, Default)]
pub struct FreshnessIndex {
    next_seq: u64,
    seqs: HashMap<String, u64>,
}

impl FreshnessIndex {
    fn track(&mut self, id: &str) {
        self.seqs.insert(id.to_string(), self.next_seq);
        self.next_seq += 1;
    }

    fn forget(&mut self, id: &str) -> bool {
        self.seqs.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    /// Least fresh of `candidates` at `now`; ties go to the earliest inserted.
    fn least_fresh<'a>(
        &self,
        candidates: impl Iterator<Item = &'a Order>,
        now: i64,
    ) -> Option<&'a Order> {
        candidates.min_by_key(|order| {
            let seq = self.seqs.get(&order.id).copied().unwrap_or(u64::MAX);
            (order.remaining_freshness(now), seq)
        })
    }
}

/// The room-temperature shelf, doubling as overflow space.
#[derive(Debug, Clone)]
pub struct OverflowShelf {
    store: BoundedStore,
    index: FreshnessIndex,
}

impl OverflowShelf {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: BoundedStore::new(Tier::Shelf, capacity),
            index: FreshnessIndex::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.store.is_full()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.store.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.store.iter()
    }

    pub fn index(&self) -> &FreshnessIndex {
        &self.index
    }

    /// See [`BoundedStore::insert`].
    ///
    /// # Errors
    /// Hands the order back when the shelf is full.
    pub fn insert(&mut self, order: Order) -> Result<(), Order> {
        let id = order.id.clone();
        self.store.insert(order)?;
        self.index.track(&id);
        Ok(())
    }

    /// See [`BoundedStore::insert_with_decay`].
    ///
    /// # Errors
    /// Hands the order back, freshness untouched, when the shelf is full.
    pub fn insert_with_decay(&mut self, order: Order) -> Result<(), Order> {
        let id = order.id.clone();
        self.store.insert_with_decay(order)?;
        self.index.track(&id);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Order> {
        let order = self.store.remove(id)?;
        self.index.forget(id);
        Some(order)
    }

    pub fn try_pickup(&mut self, id: &str, now: i64, window: PickupWindow) -> PickupOutcome {
        let outcome = self.store.try_pickup(id, now, window);
        if outcome.removed() {
            self.index.forget(id);
        }
        outcome
    }

    /// The globally least fresh resident at `now`.
    pub fn least_fresh(&self, now: i64) -> Option<&Order> {
        self.index.least_fresh(self.store.iter(), now)
    }

    /// Removes and returns the globally least fresh resident at `now`.
    pub fn take_least_fresh(&mut self, now: i64) -> Option<Order> {
        let id = self.least_fresh(now)?.id.clone();
        self.remove(&id)
    }

    /// The least fresh resident of the given temperature class at `now`.
    pub fn least_fresh_of(&self, temperature: Temperature, now: i64) -> Option<&Order> {
        self.index.least_fresh(
            self.store.iter().filter(|order| order.temperature == temperature),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MICROS_PER_SEC;

    fn order(id: &str, temperature: Temperature, freshness: u32, placed_at_secs: i64) -> Order {
        Order::new(id, "Dish", temperature, freshness, placed_at_secs * MICROS_PER_SEC)
    }

    #[test]
    fn test_least_fresh_uses_elapsed_time() {
        let mut shelf = OverflowShelf::new(3);
        // 20s of life placed at t=0 vs 15s of life placed at t=10
        shelf.insert(order("old", Temperature::Room, 20, 0)).unwrap();
        shelf.insert(order("new", Temperature::Room, 15, 10)).unwrap();

        // at t=10: old has 10 left, new has 15
        assert_eq!(shelf.least_fresh(10 * MICROS_PER_SEC).unwrap().id, "old");
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let mut shelf = OverflowShelf::new(3);
        shelf.insert(order("first", Temperature::Room, 30, 0)).unwrap();
        shelf.insert(order("second", Temperature::Room, 30, 0)).unwrap();
        assert_eq!(shelf.least_fresh(0).unwrap().id, "first");
    }

    #[test]
    fn test_least_fresh_of_filters_by_class() {
        let mut shelf = OverflowShelf::new(4);
        shelf.insert(order("room", Temperature::Room, 1, 0)).unwrap();
        shelf.insert(order("cold-a", Temperature::Cold, 50, 0)).unwrap();
        shelf.insert(order("cold-b", Temperature::Cold, 40, 0)).unwrap();

        assert_eq!(shelf.least_fresh_of(Temperature::Cold, 0).unwrap().id, "cold-b");
        assert!(shelf.least_fresh_of(Temperature::Hot, 0).is_none());
        assert_eq!(shelf.least_fresh(0).unwrap().id, "room");
    }

    #[test]
    fn test_decay_changes_ranking() {
        let mut shelf = OverflowShelf::new(2);
        shelf.insert(order("room", Temperature::Room, 30, 0)).unwrap();
        shelf.insert_with_decay(order("hot", Temperature::Hot, 40, 0)).unwrap();
        assert_eq!(shelf.get("hot").unwrap().freshness(), 20);
        assert_eq!(shelf.least_fresh(0).unwrap().id, "hot");
    }

    #[test]
    fn test_take_least_fresh_removes_from_index() {
        let mut shelf = OverflowShelf::new(2);
        shelf.insert(order("a", Temperature::Room, 5, 0)).unwrap();
        shelf.insert(order("b", Temperature::Room, 9, 0)).unwrap();

        let taken = shelf.take_least_fresh(0).unwrap();
        assert_eq!(taken.id, "a");
        assert_eq!(shelf.len(), 1);
        assert_eq!(shelf.index().len(), 1);
        assert_eq!(shelf.least_fresh(0).unwrap().id, "b");
    }

    #[test]
    fn test_remove_absent_keeps_index() {
        let mut shelf = OverflowShelf::new(2);
        shelf.insert(order("a", Temperature::Room, 5, 0)).unwrap();
        assert!(shelf.remove("zzz").is_none());
        assert_eq!(shelf.len(), 1);
        assert_eq!(shelf.index().len(), 1);
        assert_eq!(shelf.least_fresh(0).unwrap().id, "a");
    }

    #[test]
    fn test_full_shelf_rejects_without_touching_index() {
        let mut shelf = OverflowShelf::new(1);
        shelf.insert(order("a", Temperature::Room, 5, 0)).unwrap();
        let rejected = shelf.insert_with_decay(order("b", Temperature::Hot, 8, 0)).unwrap_err();
        assert_eq!(rejected.freshness(), 8);
        assert_eq!(shelf.index().len(), 1);
    }

    #[test]
    fn test_pickup_keeps_index_consistent() {
        let window = PickupWindow::new(4, 8);
        let mut shelf = OverflowShelf::new(2);
        shelf.insert(order("a", Temperature::Room, 50, 0)).unwrap();
        shelf.insert(order("b", Temperature::Room, 50, 0)).unwrap();

        assert_eq!(shelf.try_pickup("a", 1 * MICROS_PER_SEC, window), PickupOutcome::NotEligible);
        assert_eq!(shelf.index().len(), 2);
        assert_eq!(shelf.try_pickup("a", 5 * MICROS_PER_SEC, window), PickupOutcome::Picked);
        assert_eq!(shelf.index().len(), 1);
        assert_eq!(shelf.try_pickup("b", 10 * MICROS_PER_SEC, window), PickupOutcome::Discarded);
        assert!(shelf.index().is_empty());
        assert!(shelf.is_empty());
    }
}
