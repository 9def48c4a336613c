//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The subscriber uses a compact format that hides the crate/module prefix
//! (`with_target(false)`); every event carries structured fields such as `order_id`,
//! `tier` and `temperature` instead.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Startup, shutdown, and final occupancy
//! - **Decisions**: Placements, moves off the shelf, pickups, discards (`info`)
//! - **Decision Detail**: Store inserts, pickup attempts, scheduling (`debug`)
//! - **Misuse and Drops**: Duplicate orders, unknown pickups, dropped orders (`warn`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # One line per decision
//! RUST_LOG=info cargo run
//!
//! # Every store operation and pickup attempt
//! RUST_LOG=debug cargo run
//!
//! # Only the decision engine
//! RUST_LOG=kitchen_engine::kitchen=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Placed order_id="order_1" temperature=hot tier=heater
//! INFO Discarded least fresh shelf order order_id="order_9" remaining=3
//! INFO Placed order_id="order_31" temperature=hot tier=shelf
//! INFO pickup{order_id="order_1"}:pickup{id="order_1" now=1700000004612345}: Picked up order_id="order_1"
//! ```
//!
//! Pickup tasks run inside a `pickup` span, so their events show the order they serve.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
