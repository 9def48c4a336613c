use crate::clients::{Judge, KitchenClient, Submission};
use crate::clock::Clock;
use crate::config::SimulationConfig;
use crate::kitchen::{self, KitchenError, Placement};
use crate::model::{Action, Order, OrderDescriptor};
use crate::storage::PickupOutcome;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Instrument};

/// The runtime orchestrator for one kitchen simulation.
///
/// `KitchenSystem` is responsible for:
/// - **Lifecycle Management**: Starting the kitchen actor and stopping it on shutdown
/// - **Arrival Production**: Placing orders at the configured inter-arrival delay
/// - **Pickup Scheduling**: One task per placed order, retried until picked up, discarded or cancelled
/// - **Budget Enforcement**: Cancelling outstanding pickups when the time budget runs out
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(config, Arc::new(SystemClock::new()));
///
/// let actions = system.run(sample_orders()).await?;
/// let verdict = system.submit(&LogJudge, actions).await?;
///
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Client for interacting with the kitchen actor
    pub client: KitchenClient,

    config: SimulationConfig,
    clock: Arc<dyn Clock>,

    /// Task handle of the kitchen actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

/// How one scheduled pickup task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupTaskOutcome {
    Finished(PickupOutcome),
    Cancelled,
}

impl KitchenSystem {
    /// Creates the kitchen actor and spawns it in its own Tokio task.
    pub fn new(config: SimulationConfig, clock: Arc<dyn Clock>) -> Self {
        let (actor, client) = kitchen::new(&config, clock.clone());
        let handle = tokio::spawn(actor.run());

        Self {
            client,
            config,
            clock,
            handle,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replays `orders` through the kitchen and returns the resulting action log.
    ///
    /// Orders arrive one every `rate`. Each placed order gets its own pickup task that
    /// waits a random delay inside the pickup window, then retries every poll interval
    /// while the pickup is too early. When the time budget expires, arrivals stop and
    /// outstanding pickup tasks are cancelled; orders still resident stay un-acted-upon.
    ///
    /// # Errors
    /// Fails if the kitchen actor stops answering.
    pub async fn run(&self, orders: Vec<OrderDescriptor>) -> Result<Vec<Action>, KitchenError> {
        let deadline = Instant::now() + self.config.time_budget();
        let cancel = CancellationToken::new();
        let mut pickups = JoinSet::new();
        let total = orders.len();

        info!(orders = total, budget_secs = self.config.time_budget_secs, "Simulation started");

        for (n, descriptor) in orders.into_iter().enumerate() {
            if Instant::now() >= deadline {
                warn!(remaining = total - n, "Time budget expired before all orders arrived");
                break;
            }

            let order = Order::arrive(descriptor, self.clock.now_micros());
            let id = order.id.clone();
            match self.client.place(order).await {
                Ok(Placement::Placed(_)) => {
                    let delay = self.pickup_delay();
                    debug!(order_id = %id, delay_ms = delay.as_millis() as u64, "Pickup scheduled");
                    let span = tracing::info_span!("pickup", order_id = %id);
                    pickups.spawn(
                        attempt_pickup(
                            self.client.clone(),
                            id,
                            delay,
                            self.config.poll_interval(),
                            cancel.child_token(),
                        )
                        .instrument(span),
                    );
                }
                Ok(Placement::Dropped) => {}
                Err(KitchenError::DuplicateOrder(id)) => warn!(order_id = %id, "Skipping duplicate order"),
                Err(e) => return Err(e),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.rate()) => {}
                _ = tokio::time::sleep_until(deadline) => {}
            }
        }

        let drained = tokio::time::timeout_at(deadline, async {
            while let Some(joined) = pickups.join_next().await {
                log_pickup_task(joined);
            }
        })
        .await;

        if drained.is_err() {
            info!(outstanding = pickups.len(), "Time budget expired, cancelling pickups");
            cancel.cancel();
            while let Some(joined) = pickups.join_next().await {
                log_pickup_task(joined);
            }
        }

        let actions = self.client.actions().await?;
        info!(actions = actions.len(), "Simulation finished");
        Ok(actions)
    }

    /// Hands the action log and the run options to `judge`.
    ///
    /// The kitchen actor is not involved: the log has already been copied out.
    pub async fn submit(&self, judge: &dyn Judge, actions: Vec<Action>) -> Result<String, KitchenError> {
        let submission = Submission::new(&self.config, actions);
        judge.submit(&submission).await
    }

    /// Gracefully shuts down the kitchen.
    ///
    /// Drops the client, which closes the actor's channel, then waits for the actor
    /// task. Clients cloned elsewhere keep the actor alive until they are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(KitchenError::TaskFailed)` if the actor task panicked
    pub async fn shutdown(self) -> Result<(), KitchenError> {
        info!("Shutting down kitchen...");

        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Kitchen actor task failed: {:?}", e);
            return Err(KitchenError::TaskFailed(e.to_string()));
        }

        info!("Kitchen shutdown complete.");
        Ok(())
    }

    /// A uniformly random delay inside the pickup window.
    fn pickup_delay(&self) -> Duration {
        let min_ms = self.config.min_pickup_secs * 1_000;
        let max_ms = self.config.max_pickup_secs * 1_000;
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }
}

/// Waits `delay`, then tries to pick up `id`, retrying every `poll` while too early.
///
/// The kitchen actor stamps each attempt when it processes it, so the pickup is never
/// logged earlier than an action already ahead of it in the queue.
pub async fn attempt_pickup(
    client: KitchenClient,
    id: String,
    delay: Duration,
    poll: Duration,
    cancel: CancellationToken,
) -> Result<PickupTaskOutcome, KitchenError> {
    let mut wait = delay;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Pickup cancelled");
                return Ok(PickupTaskOutcome::Cancelled);
            }
            _ = tokio::time::sleep(wait) => {}
        }

        match client.pickup_now(&id).await? {
            PickupOutcome::NotEligible => wait = poll,
            outcome => return Ok(PickupTaskOutcome::Finished(outcome)),
        }
    }
}

fn log_pickup_task(joined: Result<Result<PickupTaskOutcome, KitchenError>, tokio::task::JoinError>) {
    match joined {
        Ok(Ok(outcome)) => debug!(?outcome, "Pickup task done"),
        Ok(Err(e)) => warn!(error = %e, "Pickup task failed"),
        Err(e) => error!("Pickup task panicked: {:?}", e),
    }
}
