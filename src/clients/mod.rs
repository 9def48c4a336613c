//! Type-safe clients: the [`KitchenClient`] handle onto the kitchen actor and the
//! [`Judge`] boundary that receives the finished action log.

pub mod judge;
pub mod kitchen_client;
pub mod mock;

pub use judge::*;
pub use kitchen_client::*;
