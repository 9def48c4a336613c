//! # Judge Boundary
//!
//! The judge scores a finished run. It receives the action log together with the
//! options the run was made with. Only the seam lives here: the [`Judge`] trait, the
//! [`Submission`] payload, and [`LogJudge`], a local judge that checks the log's
//! grammar and reports a summary. A remote implementation plugs in behind the trait.

use crate::config::SimulationConfig;
use crate::kitchen::KitchenError;
use crate::model::{Action, ActionKind, MICROS_PER_SEC};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Run options echoed back to the judge, all in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOptions {
    /// Inter-arrival delay.
    pub rate: i64,
    /// Earliest pickup after placement.
    pub min: i64,
    /// Latest pickup after placement.
    pub max: i64,
}

impl SubmissionOptions {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            rate: config.rate_ms as i64 * 1_000,
            min: config.min_pickup_secs as i64 * MICROS_PER_SEC,
            max: config.max_pickup_secs as i64 * MICROS_PER_SEC,
        }
    }
}

/// Everything the judge needs to score a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub options: SubmissionOptions,
    pub actions: Vec<Action>,
}

/// Totals per action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSummary {
    pub placed: usize,
    pub moved: usize,
    pub picked_up: usize,
    pub discarded: usize,
}

impl Submission {
    pub fn new(config: &SimulationConfig, actions: Vec<Action>) -> Self {
        Self {
            options: SubmissionOptions::from_config(config),
            actions,
        }
    }

    pub fn summary(&self) -> ActionSummary {
        self.actions
            .iter()
            .fold(ActionSummary::default(), |mut summary, action| {
                match action.action {
                    ActionKind::Place => summary.placed += 1,
                    ActionKind::Move => summary.moved += 1,
                    ActionKind::Pickup => summary.picked_up += 1,
                    ActionKind::Discard => summary.discarded += 1,
                }
                summary
            })
    }

    /// Checks that every order's actions read `place, move*, (pickup | discard)?`.
    ///
    /// # Errors
    /// `KitchenError::Submission` naming the first order that breaks the pattern.
    pub fn validate_sequences(&self) -> Result<(), KitchenError> {
        let mut last_seen: HashMap<&str, ActionKind> = HashMap::new();
        for action in &self.actions {
            let previous = last_seen.get(action.id.as_str()).copied();
            let valid = match (previous, action.action) {
                (None, ActionKind::Place) => true,
                (None, _) => false,
                (Some(_), ActionKind::Place) => false,
                (Some(previous), _) => !previous.is_terminal(),
            };
            if !valid {
                return Err(KitchenError::Submission(format!(
                    "order {}: unexpected {} after {}",
                    action.id,
                    action.action,
                    previous.map_or_else(|| "nothing".to_string(), |kind| kind.to_string()),
                )));
            }
            last_seen.insert(action.id.as_str(), action.action);
        }
        Ok(())
    }
}

/// Scores a submission and returns the judge's verdict.
#[async_trait]
pub trait Judge: Send + Sync {
    async fn submit(&self, submission: &Submission) -> Result<String, KitchenError>;
}

/// A local judge: validates the action grammar and reports the totals.
#[derive(Debug, Clone, Default)]
pub struct LogJudge;

#[async_trait]
impl Judge for LogJudge {
    #[instrument(skip_all, fields(actions = submission.actions.len()))]
    async fn submit(&self, submission: &Submission) -> Result<String, KitchenError> {
        if let Err(e) = submission.validate_sequences() {
            warn!(error = %e, "Submission rejected");
            return Err(e);
        }
        let summary = submission.summary();
        info!(?summary, options = ?submission.options, "Submission accepted");
        Ok(format!(
            "accepted: {} placed, {} moved, {} picked up, {} discarded",
            summary.placed, summary.moved, summary.picked_up, summary.discarded
        ))
    }
}
