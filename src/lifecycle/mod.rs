//! # Simulation Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of a kitchen simulation: starting the
//! kitchen actor, feeding it orders, scheduling pickups, enforcing the time budget and
//! shutting everything down.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - Build the [`OrderManager`](crate::kitchen::OrderManager) and spawn its actor
//! 2. **Arrival Production** - Place orders at the configured rate
//! 3. **Pickup Scheduling** - One cancellable task per placed order
//! 4. **Graceful Shutdown** - Cancel outstanding pickups, close the channel, await the actor
//! 5. **Observability Setup** - Initialize tracing and logging infrastructure
//!
//! ## Graceful Shutdown
//!
//! 1. **Budget expires** - The shared `CancellationToken` is cancelled
//! 2. **Pickup tasks exit** - Each observes cancellation and returns without acting
//! 3. **Drop the client** - Closes the sender side of the channel
//! 4. **Actor exits** - `receiver.recv()` returns `None`; the actor logs its final state
//!
//! Orders still resident when the budget expires get no terminal action.

pub mod kitchen_system;
pub mod problem;
pub mod tracing;

pub use kitchen_system::*;
pub use problem::*;
pub use self::tracing::setup_tracing;
