//! # Kitchen Actor
//!
//! The single worker that owns the [`OrderManager`]. Every placement and pickup in the
//! system arrives here as a [`KitchenRequest`] and is handled to completion before the
//! next one is read, so capacity checks across the three tiers and the action-log
//! append always observe one consistent state. No `Mutex` is needed: the actor owns the
//! manager exclusively inside its task.

use super::{KitchenError, Occupancy, OrderManager, Placement};
use crate::clients::KitchenClient;
use crate::model::{Action, Order};
use crate::storage::PickupOutcome;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, KitchenError>>;

/// Requests understood by the [`KitchenActor`].
#[derive(Debug)]
pub enum KitchenRequest {
    Place {
        order: Order,
        respond_to: Response<Placement>,
    },
    Pickup {
        id: String,
        /// Microseconds since the Unix epoch.
        now: i64,
        respond_to: Response<PickupOutcome>,
    },
    /// A pickup judged at the time the actor processes it.
    PickupNow {
        id: String,
        respond_to: Response<PickupOutcome>,
    },
    Occupancy {
        respond_to: Response<Occupancy>,
    },
    Actions {
        respond_to: Response<Vec<Action>>,
    },
}

/// The server half: owns the manager and the receiving end of the channel.
pub struct KitchenActor {
    receiver: mpsc::Receiver<KitchenRequest>,
    manager: OrderManager,
}

impl KitchenActor {
    /// Creates the actor and a client connected to it.
    ///
    /// `buffer_size` bounds the number of queued requests; senders wait when it is full.
    pub fn new(buffer_size: usize, manager: OrderManager) -> (Self, KitchenClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, manager };
        (actor, KitchenClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self) {
        info!("Kitchen actor started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                KitchenRequest::Place { order, respond_to } => {
                    let result = self.manager.place(order);
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Pickup { id, now, respond_to } => {
                    let result = self.manager.pickup(&id, now);
                    let _ = respond_to.send(result);
                }
                KitchenRequest::PickupNow { id, respond_to } => {
                    let result = self.manager.pickup_now(&id);
                    let _ = respond_to.send(result);
                }
                KitchenRequest::Occupancy { respond_to } => {
                    let occupancy = self.manager.occupancy();
                    debug!(?occupancy, "Occupancy");
                    let _ = respond_to.send(Ok(occupancy));
                }
                KitchenRequest::Actions { respond_to } => {
                    let _ = respond_to.send(Ok(self.manager.actions().to_vec()));
                }
            }
        }

        let occupancy = self.manager.occupancy();
        info!(
            actions = self.manager.actions().len(),
            heater = occupancy.heater,
            cooler = occupancy.cooler,
            shelf = occupancy.shelf,
            "Kitchen actor shutdown"
        );
    }
}
