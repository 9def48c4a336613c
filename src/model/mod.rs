//! Pure data structures: orders, their temperature classes and tiers, and action records.

pub mod action;
pub mod order;

pub use action::*;
pub use order::*;
