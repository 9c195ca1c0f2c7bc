//! Background submission worker
//!
//! Runs the remote call on a tokio task so the draw loop keeps ticking while
//! the request is outstanding.

use super::submit::{FailureKind, PreparedSubmission, SubmissionResult, Submitter};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

/// Handle to a submission running in the background
pub struct SubmissionHandle {
    result_rx: oneshot::Receiver<SubmissionResult>,
    _task: JoinHandle<()>,
}

impl SubmissionHandle {
    /// Spawn the remote call for a prepared submission
    pub fn spawn(submitter: Submitter, prepared: PreparedSubmission) -> Self {
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let result = submitter.send(prepared).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(result);
        });
        Self {
            result_rx: rx,
            _task: task,
        }
    }

    /// Try to receive the outcome (non-blocking)
    pub fn try_recv(&mut self) -> Option<SubmissionResult> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(SubmissionResult::failure(
                FailureKind::Network,
                "submission task ended without a result",
            )),
        }
    }

    /// Wait for the outcome
    #[cfg(test)]
    pub async fn wait(self) -> SubmissionResult {
        self.result_rx.await.unwrap_or_else(|_| {
            SubmissionResult::failure(
                FailureKind::Network,
                "submission task ended without a result",
            )
        })
    }
}
