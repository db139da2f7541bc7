//! Step submission seam.

use async_trait::async_trait;
use thiserror::Error;
use udyam_types::{StepAccepted, StepSubmission};

/// Submission failures as the wizard distinguishes them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The service answered with an error envelope; the message is shown
    /// as-is.
    #[error("step rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Persists one wizard step with the registration service.
#[async_trait]
pub trait StepSubmitter: Send + Sync {
    async fn submit_step(&self, submission: &StepSubmission)
        -> Result<StepAccepted, SubmitError>;
}

/// What a completed submission did to the wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Moved to the next step.
    Advanced,
    /// Last step accepted; the wizard is done.
    Completed,
    /// Stayed on the step; a step-level error was recorded.
    Stayed,
    /// Submission never left: field errors, a submit already in flight,
    /// or the wizard already completed.
    Held,
}
