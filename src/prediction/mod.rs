//! Prediction pipeline: feature vector, HTTP transport and submission

mod client;
pub mod features;
mod submit;
mod traits;
mod verdict;
mod worker;

pub use client::HttpPredictionClient;
pub use features::zscore_preview;
pub use submit::{SubmissionResult, Submitter};
pub use verdict::Verdict;
pub use worker::SubmissionHandle;

#[cfg(test)]
pub use submit::FailureKind;
#[cfg(test)]
pub use traits::{MockPredictionService, ServiceError};
