//! # Kitchen Simulation
//!
//! Replays a list of orders through the kitchen in real time, then submits the action
//! log to the judge and prints it as JSON.
//!
//! The order list comes from `KITCHEN_PROBLEM` when set, otherwise from the built-in
//! [`sample_orders`]. See [`SimulationConfig`] for the other knobs.

use kitchen_engine::clients::LogJudge;
use kitchen_engine::clock::SystemClock;
use kitchen_engine::config::SimulationConfig;
use kitchen_engine::kitchen::KitchenError;
use kitchen_engine::lifecycle::{load_problem, sample_orders, setup_tracing, KitchenSystem};
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), KitchenError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = SimulationConfig::from_env().inspect_err(|e| error!(error = %e, "Bad configuration"))?;
    let orders = match &config.problem_path {
        Some(path) => load_problem(path)?,
        None => sample_orders(),
    };

    info!(?config, orders = orders.len(), "Starting kitchen simulation");

    let system = KitchenSystem::new(config, Arc::new(SystemClock::new()));

    let span = tracing::info_span!("simulation");
    let actions = system.run(orders).instrument(span).await?;

    match system.submit(&LogJudge, actions.clone()).await {
        Ok(verdict) => info!(%verdict, "Submission accepted"),
        Err(e) => error!(error = %e, "Submission failed"),
    }

    println!("{}", serde_json::to_string_pretty(&actions)?);

    system.shutdown().await?;

    info!("Simulation completed successfully");
    Ok(())
}
