//! Error kinds surfaced by the submission pipeline.

use crate::scheduler::SchedulerError;
use crate::submit::SubmissionRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Both or neither of `jobs` / `s3_path` were given, or the reference is unusable.
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("malformed request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("duplicate job name in batch: {0}")]
    DuplicateJob(String),

    #[error("job {job} depends on unknown job {missing}")]
    UnresolvedDependency { job: String, missing: String },

    #[error("cyclic dependency among jobs: {}", .jobs.join(", "))]
    CyclicDependency { jobs: Vec<String> },

    #[error("failed to fetch job spec from {location}: {reason}")]
    SpecFetch { location: String, reason: String },

    /// Jobs in `partial` were accepted by the scheduler and remain submitted.
    #[error("submission of job {job} failed after {} job(s) were accepted", .partial.len())]
    SchedulerSubmission {
        job: String,
        partial: SubmissionRecord,
        #[source]
        source: SchedulerError,
    },
}

impl SubmitError {
    /// True for errors raised before any scheduler call could have happened.
    pub fn is_structural(&self) -> bool {
        !matches!(self, SubmitError::SchedulerSubmission { .. })
    }
}
