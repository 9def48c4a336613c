//! # Kitchen Engine
//!
//! > **Real-time order placement, relocation and pickup for a delivery kitchen.**
//!
//! Orders arrive one at a time and go to the storage tier matching their temperature:
//! the heater for hot orders, the cooler for cold ones, and the overflow shelf for
//! room-temperature orders or anything that does not fit. Freshness is measured in
//! seconds; an order past its freshness is discarded instead of picked up. Every
//! decision is recorded in an append-only action log that is handed to a judge at the
//! end of a run.
//!
//! ## Core Concepts
//!
//! ### Stores
//! [`BoundedStore`](storage::BoundedStore) is a capacity-limited container for one tier.
//! [`OverflowShelf`](storage::OverflowShelf) adds a freshness index so the least fresh
//! order can be found when the shelf needs a free slot.
//!
//! ### The Decision Engine
//! [`OrderManager`](kitchen::OrderManager) owns the three stores and the action log and
//! implements placement, relocation, eviction and pickup. It is plain synchronous code:
//! it never sleeps and never spawns.
//!
//! ### Serialized Access
//! The manager is owned by a single [`KitchenActor`](kitchen::KitchenActor). Callers talk
//! to it through a cloneable [`KitchenClient`](clients::KitchenClient); requests are
//! processed one at a time, so every operation observes and leaves a consistent state.
//!
//! ### Time
//! All timestamps are microseconds since the Unix epoch, read from a [`Clock`](clock::Clock).
//! Tests use [`ManualClock`](clock::ManualClock) to move time by hand.
//!
//! ## Module Tour
//!
//! - [`model`] - Orders, temperatures, tiers and log entries
//! - [`storage`] - Bounded stores and the overflow shelf
//! - [`kitchen`] - The decision engine and its actor
//! - [`clients`] - The kitchen client and the judge boundary
//! - [`lifecycle`] - Simulation harness, problem loading and tracing setup
//! - [`config`] - Run configuration from `KITCHEN_*` environment variables
//! - [`clock`] - Microsecond clocks
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the built-in sample with one log line per decision
//! RUST_LOG=info cargo run
//!
//! # Replay a problem file with a tighter pickup window
//! KITCHEN_PROBLEM=orders.json KITCHEN_MIN_SECS=2 KITCHEN_MAX_SECS=4 cargo run
//! ```

pub mod clients;
pub mod clock;
pub mod config;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
pub mod storage;
