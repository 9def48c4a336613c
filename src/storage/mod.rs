//! Storage tiers: the generic [`BoundedStore`] (heater, cooler) and the
//! freshness-ranked [`OverflowShelf`].
//!
//! Stores hold no locks. They are only ever touched by the
//! [`OrderManager`](crate::kitchen::OrderManager), which is itself owned by a single
//! actor task.

pub mod bounded;
pub mod shelf;

pub use bounded::*;
pub use shelf::*;
