//! # Kitchen Client
//!
//! Provides a type-safe API for talking to the [`KitchenActor`](crate::kitchen::KitchenActor).
//! Clones are cheap and can be handed to any number of tasks; every call is queued on
//! the actor and answered over a oneshot channel.
use crate::kitchen::{KitchenError, KitchenRequest, Occupancy, Placement};
use crate::model::{Action, Order};
use crate::storage::PickupOutcome;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the kitchen actor.
#[derive(Clone)]
pub struct KitchenClient {
    sender: mpsc::Sender<KitchenRequest>,
}

impl KitchenClient {
    pub fn new(sender: mpsc::Sender<KitchenRequest>) -> Self {
        Self { sender }
    }

    /// Places a newly arrived order.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn place(&self, order: Order) -> Result<Placement, KitchenError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(KitchenRequest::Place { order, respond_to }).await?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    /// Attempts a pickup of `id` at `now` (µs since the Unix epoch).
    #[instrument(skip(self))]
    pub async fn pickup(&self, id: &str, now: i64) -> Result<PickupOutcome, KitchenError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(KitchenRequest::Pickup {
            id: id.to_string(),
            now,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    /// Attempts a pickup of `id`, stamped by the actor when it is processed.
    #[instrument(skip(self))]
    pub async fn pickup_now(&self, id: &str) -> Result<PickupOutcome, KitchenError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(KitchenRequest::PickupNow {
            id: id.to_string(),
            respond_to,
        })
        .await?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    pub async fn occupancy(&self) -> Result<Occupancy, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.send(KitchenRequest::Occupancy { respond_to }).await?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    /// A copy of the action log as it stands now.
    pub async fn actions(&self) -> Result<Vec<Action>, KitchenError> {
        let (respond_to, response) = oneshot::channel();
        self.send(KitchenRequest::Actions { respond_to }).await?;
        response.await.map_err(|_| KitchenError::ActorDropped)?
    }

    async fn send(&self, request: KitchenRequest) -> Result<(), KitchenError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| KitchenError::ActorClosed)
    }
}
