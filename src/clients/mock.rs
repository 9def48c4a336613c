//! # Mock Judge
//!
//! An in-memory [`Judge`] for tests. Queue the verdicts you expect, run the code under
//! test, then [`verify`](MockJudge::verify) that every expectation was consumed and
//! inspect what was submitted.
//!
//! ```rust
//! use kitchen_engine::clients::{mock::MockJudge, Judge, Submission, SubmissionOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let judge = MockJudge::new();
//!     judge.expect_submit().return_ok("scored");
//!
//!     let submission = Submission {
//!         options: SubmissionOptions { rate: 500_000, min: 4_000_000, max: 8_000_000 },
//!         actions: vec![],
//!     };
//!     assert_eq!(judge.submit(&submission).await.unwrap(), "scored");
//!     judge.verify();
//! }
//! ```

use super::{Judge, Submission};
use crate::kitchen::KitchenError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A judge with queued verdicts and a record of every submission.
#[derive(Debug, Clone, Default)]
pub struct MockJudge {
    verdicts: Arc<Mutex<VecDeque<Result<String, KitchenError>>>>,
    submissions: Arc<Mutex<Vec<Submission>>>,
}

/// Builder returned by [`MockJudge::expect_submit`].
pub struct SubmitExpectation<'a> {
    judge: &'a MockJudge,
}

impl SubmitExpectation<'_> {
    pub fn return_ok(self, verdict: impl Into<String>) {
        self.judge.verdicts.lock().unwrap().push_back(Ok(verdict.into()));
    }

    pub fn return_err(self, error: KitchenError) {
        self.judge.verdicts.lock().unwrap().push_back(Err(error));
    }
}

impl MockJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one more submission.
    pub fn expect_submit(&self) -> SubmitExpectation<'_> {
        SubmitExpectation { judge: self }
    }

    /// Everything submitted so far.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    /// Panics if any queued verdict was never consumed.
    pub fn verify(&self) {
        let remaining = self.verdicts.lock().unwrap().len();
        assert_eq!(remaining, 0, "MockJudge: {remaining} expected submission(s) never arrived");
    }
}

#[async_trait]
impl Judge for MockJudge {
    async fn submit(&self, submission: &Submission) -> Result<String, KitchenError> {
        self.submissions.lock().unwrap().push(submission.clone());
        self.verdicts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(KitchenError::Submission("MockJudge: unexpected submission".into())))
    }
}
