//! Submission orchestration
//!
//! Gates a form on completeness, sends its feature vector and classifies the
//! outcome. Every failure is returned as a [`SubmissionResult::Failure`]; no
//! error escapes and nothing is retried.

use super::features::{build_feature_vector, FeatureVector};
use super::traits::{PredictionService, ServiceError};
use super::verdict::Verdict;
use crate::state::{FormState, InvalidField};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Failure categories surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Network,
    Server,
    InProgress,
}

impl FailureKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation => "Incomplete form",
            Self::Network => "Service unreachable",
            Self::Server => "Service error",
            Self::InProgress => "Submission in progress",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "ValidationError",
            Self::Network => "NetworkError",
            Self::Server => "ServerError",
            Self::InProgress => "InProgress",
        };
        f.write_str(name)
    }
}

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success(Verdict),
    Failure { kind: FailureKind, detail: String },
}

impl SubmissionResult {
    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            detail: detail.into(),
        }
    }

    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[cfg(test)]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failure { kind, .. } => Some(*kind),
            Self::Success(_) => None,
        }
    }
}

impl From<ServiceError> for SubmissionResult {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Network(detail) => Self::failure(FailureKind::Network, detail),
            ServiceError::Server { status, body } => {
                Self::failure(FailureKind::Server, server_detail(status, &body))
            }
            ServiceError::Decode(detail) => {
                Self::failure(FailureKind::Server, format!("unreadable verdict: {detail}"))
            }
        }
    }
}

/// Prefer the `error` message of a JSON error body over the raw text
fn server_detail(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<Verdict>(body)
        .ok()
        .and_then(|v| v.service_error().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    if message.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {message}")
    }
}

fn validation_detail(invalid: &[InvalidField]) -> String {
    invalid
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A feature vector that passed the gate and is ready to send
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub id: Uuid,
    pub features: FeatureVector,
}

/// Builds, gates and sends form submissions
#[derive(Clone)]
pub struct Submitter {
    service: Arc<dyn PredictionService>,
    enforce_validation: bool,
}

impl Submitter {
    pub fn new(service: Arc<dyn PredictionService>, enforce_validation: bool) -> Self {
        Self {
            service,
            enforce_validation,
        }
    }

    /// Build the vector and mark the form in flight.
    ///
    /// Returns the failure to report when the form is busy or incomplete; in
    /// that case the form's phase is left as it was.
    pub fn prepare(&self, form: &mut FormState) -> Result<PreparedSubmission, SubmissionResult> {
        if form.is_submitting() {
            return Err(SubmissionResult::failure(
                FailureKind::InProgress,
                "wait for the current submission to finish",
            ));
        }

        let id = Uuid::new_v4();
        let features = build_feature_vector(form);

        if self.enforce_validation {
            let invalid = form.invalid_fields();
            if !invalid.is_empty() {
                let names: Vec<&str> = invalid.iter().map(|i| i.field.wire_name()).collect();
                tracing::warn!(submission = %id, fields = ?names, "Form failed validation");
                return Err(SubmissionResult::failure(
                    FailureKind::Validation,
                    validation_detail(&invalid),
                ));
            }
        }

        form.begin_submission()
            .map_err(|e| SubmissionResult::failure(FailureKind::InProgress, e.to_string()))?;
        Ok(PreparedSubmission { id, features })
    }

    /// Perform the remote call for a prepared submission
    pub async fn send(&self, prepared: PreparedSubmission) -> SubmissionResult {
        let span = tracing::info_span!("submission", id = %prepared.id);
        let service = Arc::clone(&self.service);
        async move {
            tracing::info!(endpoint = %service.endpoint(), "Sending feature vector");
            match service.predict(&prepared.features).await {
                Ok(verdict) => {
                    tracing::info!(prediction = ?verdict.prediction(), "Received verdict");
                    SubmissionResult::Success(verdict)
                }
                Err(err) => {
                    match &err {
                        ServiceError::Server { status, .. } => {
                            tracing::warn!(status, "Prediction service rejected request")
                        }
                        other => tracing::error!(error = %other, "Prediction request failed"),
                    }
                    SubmissionResult::from(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Build, gate, send and classify in one step
    #[allow(dead_code)]
    pub async fn submit(&self, form: &mut FormState) -> SubmissionResult {
        let prepared = match self.prepare(form) {
            Ok(prepared) => prepared,
            Err(result) => return result,
        };
        let result = self.send(prepared).await;
        form.finish_submission();
        result
    }
}
