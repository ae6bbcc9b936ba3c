//! Submission request and the source-mode check that runs before any I/O.
//!
//! Exactly one of:
//!   { "jobs": [ Job, ... ] }
//!   { "s3_path": "s3://bucket/key" }

use crate::error::SubmitError;
use crate::spec::{JobSpec, SpecLocation};
use serde::Deserialize;
use serde_json::Value;
use tracing::{Span, info};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    /// Kept raw until the source mode is settled; typed by `Validator`.
    #[serde(default)]
    pub jobs: Option<Value>,

    #[serde(default)]
    pub s3_path: Option<String>,
}

impl Request {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SubmitError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Where the job list comes from.
#[derive(Debug, Clone)]
pub enum SpecMode {
    Inline(Vec<JobSpec>),
    External(SpecLocation),
}

pub struct Validator {
    span: Span,
}

impl Validator {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    pub fn validate(&self, request: Request) -> Result<SpecMode, SubmitError> {
        let _entered = self.span.enter();

        match (request.jobs, request.s3_path) {
            (Some(_), Some(_)) => Err(SubmitError::Validation(
                "'jobs' and 's3_path' cannot both be set".to_string(),
            )),
            (None, None) => Err(SubmitError::Validation(
                "one of 'jobs' or 's3_path' must be specified".to_string(),
            )),
            (Some(jobs), None) => {
                let jobs: Vec<JobSpec> = serde_json::from_value(jobs)?;
                info!(jobs = jobs.len(), "request carries an inline job list");
                Ok(SpecMode::Inline(jobs))
            }
            (None, Some(path)) => {
                let location: SpecLocation = path.parse().map_err(|e: anyhow::Error| {
                    SubmitError::Validation(format!("invalid s3_path: {:#}", e))
                })?;
                info!(%location, "request references an external job list");
                Ok(SpecMode::External(location))
            }
        }
    }
}
