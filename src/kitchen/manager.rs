//! # Order Manager
//!
//! The decision engine of the kitchen. It owns the heater, the cooler and the shelf,
//! routes every arriving order to a tier, relocates or discards shelf residents when
//! everything is full, resolves pickups against the pickup window, and appends every
//! outcome to the action log.
//!
//! ## Placement
//!
//! 1. Try the ideal tier (heater for hot, cooler for cold, shelf for room).
//! 2. Hot and cold orders then try the shelf, halving their freshness.
//! 3. With the shelf full, free one slot: move the least fresh shelf resident that
//!    fits back into its own (non-full) ideal tier, otherwise discard the least fresh
//!    shelf resident. Then retry the shelf, halving freshness for every class.
//!
//! ## Pickup
//!
//! The order's ideal tier is checked first, then the shelf. Inside the window the order
//! is picked up, past it the order is discarded, before it nothing happens.
//!
//! The manager is not synchronized. It is owned by one
//! [`KitchenActor`](super::KitchenActor), which serializes every request.

use crate::clock::Clock;
use crate::config::SimulationConfig;
use crate::kitchen::KitchenError;
use crate::model::{Action, ActionKind, Order, Temperature, Tier};
use crate::storage::{BoundedStore, OverflowShelf, PickupOutcome, PickupWindow};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a placed order ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed(Tier),
    /// No shelf slot could be freed. No action was recorded.
    Dropped,
}

/// Resident counts per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occupancy {
    pub heater: usize,
    pub cooler: usize,
    pub shelf: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Resident(Temperature),
    Finished,
}

pub struct OrderManager {
    heater: BoundedStore,
    cooler: BoundedStore,
    shelf: OverflowShelf,
    window: PickupWindow,
    clock: Arc<dyn Clock>,
    ledger: HashMap<String, Lifecycle>,
    actions: Vec<Action>,
}

impl OrderManager {
    pub fn new(
        heater_capacity: usize,
        cooler_capacity: usize,
        shelf_capacity: usize,
        window: PickupWindow,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            heater: BoundedStore::new(Tier::Heater, heater_capacity),
            cooler: BoundedStore::new(Tier::Cooler, cooler_capacity),
            shelf: OverflowShelf::new(shelf_capacity),
            window,
            clock,
            ledger: HashMap::new(),
            actions: Vec::new(),
        }
    }

    pub fn from_config(config: &SimulationConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            config.heater_capacity,
            config.cooler_capacity,
            config.shelf_capacity,
            config.pickup_window(),
            clock,
        )
    }

    pub fn heater(&self) -> &BoundedStore {
        &self.heater
    }

    pub fn cooler(&self) -> &BoundedStore {
        &self.cooler
    }

    pub fn shelf(&self) -> &OverflowShelf {
        &self.shelf
    }

    pub fn window(&self) -> PickupWindow {
        self.window
    }

    /// The action log, in append order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            heater: self.heater.len(),
            cooler: self.cooler.len(),
            shelf: self.shelf.len(),
        }
    }

    /// Places a newly arrived order.
    ///
    /// The `place` action carries the order's arrival timestamp; any `move` or
    /// `discard` needed to make room carries the current time.
    ///
    /// # Errors
    /// `KitchenError::DuplicateOrder` if the id was placed before. Nothing is changed.
    pub fn place(&mut self, order: Order) -> Result<Placement, KitchenError> {
        if self.ledger.contains_key(&order.id) {
            warn!(order_id = %order.id, "Duplicate order ignored");
            return Err(KitchenError::DuplicateOrder(order.id));
        }
        debug!(?order, "Placing");

        let id = order.id.clone();
        let temperature = order.temperature;
        let arrival = order.placed_at();
        let now = self.clock.now_micros();

        match self.route(order, now) {
            Ok(tier) => {
                self.ledger.insert(id.clone(), Lifecycle::Resident(temperature));
                self.record(arrival, &id, ActionKind::Place);
                info!(order_id = %id, %temperature, %tier, "Placed");
                Ok(Placement::Placed(tier))
            }
            Err(order) => {
                self.ledger.insert(id, Lifecycle::Finished);
                warn!(order_id = %order.id, "No shelf slot could be freed; order dropped");
                Ok(Placement::Dropped)
            }
        }
    }

    /// Attempts to pick up `id` at `now` (µs).
    ///
    /// Returns the outcome of the first store that holds the order. `NotEligible`
    /// leaves the order in place for a later attempt; an order that already reached
    /// pickup or discard reports `Absent`.
    ///
    /// # Errors
    /// `KitchenError::UnknownOrder` if the id was never placed. Nothing is changed.
    pub fn pickup(&mut self, id: &str, now: i64) -> Result<PickupOutcome, KitchenError> {
        let temperature = match self.ledger.get(id) {
            None => {
                warn!(order_id = %id, "Pickup of unknown order ignored");
                return Err(KitchenError::UnknownOrder(id.to_string()));
            }
            Some(Lifecycle::Finished) => return Ok(PickupOutcome::Absent),
            Some(Lifecycle::Resident(temperature)) => *temperature,
        };

        let window = self.window;
        let mut outcome = match self.ideal_store_mut(temperature) {
            Some(store) => store.try_pickup(id, now, window),
            None => PickupOutcome::Absent,
        };
        if outcome == PickupOutcome::Absent {
            outcome = self.shelf.try_pickup(id, now, window);
        }

        match outcome {
            PickupOutcome::Picked => {
                self.finish(id, now, ActionKind::Pickup);
                info!(order_id = %id, "Picked up");
            }
            PickupOutcome::Discarded => {
                self.finish(id, now, ActionKind::Discard);
                info!(order_id = %id, "Discarded, pickup too late");
            }
            PickupOutcome::NotEligible => debug!(order_id = %id, "Pickup too early"),
            PickupOutcome::Absent => warn!(order_id = %id, "Resident order not found in any store"),
        }
        Ok(outcome)
    }

    /// Attempts to pick up `id`, reading "now" from the kitchen clock at decision time.
    ///
    /// Pickups queued behind other requests are therefore judged, and logged, at the
    /// moment they are processed.
    pub fn pickup_now(&mut self, id: &str) -> Result<PickupOutcome, KitchenError> {
        let now = self.clock.now_micros();
        self.pickup(id, now)
    }

    fn route(&mut self, mut order: Order, now: i64) -> Result<Tier, Order> {
        order.stamp(now);
        let temperature = order.temperature;

        let order = match self.ideal_store_mut(temperature) {
            Some(store) => match store.insert(order) {
                Ok(()) => return Ok(store.tier()),
                Err(order) => order,
            },
            None => match self.shelf.insert(order) {
                Ok(()) => return Ok(Tier::Shelf),
                Err(order) => order,
            },
        };

        let order = if temperature == Temperature::Room {
            order
        } else {
            debug!(order_id = %order.id, %temperature, "Ideal tier full, trying shelf");
            match self.shelf.insert_with_decay(order) {
                Ok(()) => return Ok(Tier::Shelf),
                Err(order) => order,
            }
        };

        debug!(order_id = %order.id, "Shelf full, freeing a slot");
        self.free_shelf_slot(temperature, now);

        // every class, room included, decays when it has to wait for a freed slot
        self.shelf.insert_with_decay(order).map(|()| Tier::Shelf)
    }

    /// Frees one shelf slot, preferring a relocation over a discard.
    fn free_shelf_slot(&mut self, incoming: Temperature, now: i64) {
        for &candidate in relocation_candidates(incoming) {
            if self.ideal_store(candidate).map_or(true, BoundedStore::is_full) {
                continue;
            }
            let Some(id) = self.shelf.least_fresh_of(candidate, now).map(|o| o.id.clone()) else {
                continue;
            };
            if self.relocate(&id, now) {
                return;
            }
        }

        if let Some(discarded) = self.shelf.take_least_fresh(now) {
            info!(
                order_id = %discarded.id,
                remaining = discarded.remaining_freshness(now),
                "Discarded least fresh shelf order"
            );
            self.finish(&discarded.id, now, ActionKind::Discard);
        }
    }

    /// Moves a shelf resident back into its ideal tier.
    fn relocate(&mut self, id: &str, now: i64) -> bool {
        let Some(mut order) = self.shelf.get(id).cloned() else {
            return false;
        };
        order.stamp(now);
        let Some(target) = self.ideal_store_mut(order.temperature) else {
            return false;
        };
        let tier = target.tier();
        if target.insert(order).is_err() {
            return false;
        }
        self.shelf.remove(id);
        self.record(now, id, ActionKind::Move);
        info!(order_id = %id, to = %tier, "Moved off shelf");
        true
    }

    fn finish(&mut self, id: &str, now: i64, kind: ActionKind) {
        debug_assert!(kind.is_terminal());
        self.ledger.insert(id.to_string(), Lifecycle::Finished);
        self.record(now, id, kind);
    }

    fn record(&mut self, timestamp: i64, id: &str, kind: ActionKind) {
        self.actions.push(Action::new(timestamp, id, kind));
    }

    fn ideal_store(&self, temperature: Temperature) -> Option<&BoundedStore> {
        match temperature {
            Temperature::Hot => Some(&self.heater),
            Temperature::Cold => Some(&self.cooler),
            Temperature::Room => None,
        }
    }

    fn ideal_store_mut(&mut self, temperature: Temperature) -> Option<&mut BoundedStore> {
        match temperature {
            Temperature::Hot => Some(&mut self.heater),
            Temperature::Cold => Some(&mut self.cooler),
            Temperature::Room => None,
        }
    }
}

/// Shelf residents that may be moved out to make room for `incoming`, in preference order.
fn relocation_candidates(incoming: Temperature) -> &'static [Temperature] {
    match incoming {
        Temperature::Hot => &[Temperature::Cold],
        Temperature::Cold => &[Temperature::Hot],
        Temperature::Room => &[Temperature::Hot, Temperature::Cold],
    }
}
