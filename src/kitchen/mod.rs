//! # Kitchen
//!
//! The placement and eviction engine, plus the actor that serializes access to it.
//!
//! ## Structure
//!
//! - [`manager`] - [`OrderManager`], the synchronous decision engine
//! - [`actor`] - [`KitchenActor`], the single worker owning the manager
//! - [`error`] - [`KitchenError`] for caller misuse and infrastructure failures
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use kitchen_engine::clock::{Clock, SystemClock};
//! use kitchen_engine::config::SimulationConfig;
//! use kitchen_engine::kitchen::{self, Placement};
//! use kitchen_engine::model::{Order, Temperature, Tier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clock = Arc::new(SystemClock::new());
//!     let (actor, client) = kitchen::new(&SimulationConfig::default(), clock.clone());
//!     tokio::spawn(actor.run());
//!
//!     let order = Order::new("a1", "Pizza", Temperature::Hot, 120, clock.now_micros());
//!     assert_eq!(client.place(order).await?, Placement::Placed(Tier::Heater));
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod error;
pub mod manager;

pub use actor::*;
pub use error::*;
pub use manager::*;

use crate::clients::KitchenClient;
use crate::clock::Clock;
use crate::config::SimulationConfig;
use std::sync::Arc;

/// Request queue depth of the kitchen actor.
pub const REQUEST_BUFFER_SIZE: usize = 32;

/// Creates a new kitchen actor and its client.
pub fn new(config: &SimulationConfig, clock: Arc<dyn Clock>) -> (KitchenActor, KitchenClient) {
    let manager = OrderManager::from_config(config, clock);
    KitchenActor::new(REQUEST_BUFFER_SIZE, manager)
}
