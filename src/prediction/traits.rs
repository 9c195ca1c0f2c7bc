//! Trait abstraction for the prediction service to enable mocking in tests

use super::features::FeatureVector;
use super::verdict::Verdict;
use async_trait::async_trait;
use thiserror::Error;

/// Failures at the prediction service boundary
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be completed (refused, DNS, timeout)
    #[error("{0}")]
    Network(String),
    /// The service answered with a non-success status
    #[error("service returned {status}: {body}")]
    Server { status: u16, body: String },
    /// The service answered 2xx but the body was not a JSON verdict
    #[error("unreadable verdict: {0}")]
    Decode(String),
}

/// Remote procedure that turns a feature vector into a verdict
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Send one feature vector and wait for the verdict
    async fn predict(&self, features: &FeatureVector) -> Result<Verdict, ServiceError>;

    /// Where requests are sent, for logging
    fn endpoint(&self) -> String;
}
