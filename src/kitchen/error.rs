//! Error types for the kitchen.

use thiserror::Error;

/// Errors surfaced by the kitchen and its harness.
///
/// Store-full, not-yet-eligible and similar decision outcomes are *not* errors;
/// they are typed results ([`Placement`](super::Placement),
/// [`PickupOutcome`](crate::storage::PickupOutcome)).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    /// An order with this id has already been placed. Nothing was changed.
    #[error("Duplicate order: {0}")]
    DuplicateOrder(String),

    /// No order with this id was ever placed. Nothing was changed.
    #[error("Unknown order: {0}")]
    UnknownOrder(String),

    /// The kitchen actor is no longer accepting requests.
    #[error("Kitchen actor closed")]
    ActorClosed,

    /// The kitchen actor dropped the response channel.
    #[error("Kitchen actor dropped response channel")]
    ActorDropped,

    /// A background task panicked or was aborted.
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// A configuration value is missing a valid form or contradicts another.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The problem definition could not be read or parsed.
    #[error("Problem error: {0}")]
    Problem(String),

    /// The judge rejected or failed to receive the submission.
    #[error("Submission error: {0}")]
    Submission(String),
}

impl From<serde_json::Error> for KitchenError {
    fn from(e: serde_json::Error) -> Self {
        KitchenError::Problem(e.to_string())
    }
}
