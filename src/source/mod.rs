//! Spec source: fetches an externally stored job list and parses it into the
//! same shape as an inline `jobs` array.
//!
//! Accepted documents:
//!   [ Job, ... ]
//!   { "jobs": [ Job, ... ] }

pub mod store;

pub use store::SpecStore;

use crate::error::SubmitError;
use crate::spec::{JobSpec, SpecLocation};
use serde::Deserialize;

pub trait SpecSource {
    /// Raw document bytes. Failures are `SubmitError::SpecFetch`.
    fn fetch(&self, location: &SpecLocation) -> Result<Vec<u8>, SubmitError>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SpecDocument {
    List(Vec<JobSpec>),
    Wrapped { jobs: Vec<JobSpec> },
}

pub fn parse_jobs(location: &SpecLocation, bytes: &[u8]) -> Result<Vec<JobSpec>, SubmitError> {
    let doc: SpecDocument = serde_json::from_slice(bytes).map_err(|e| SubmitError::SpecFetch {
        location: location.to_string(),
        reason: format!("not a job list: {}", e),
    })?;
    Ok(match doc {
        SpecDocument::List(jobs) | SpecDocument::Wrapped { jobs } => jobs,
    })
}
