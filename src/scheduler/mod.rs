//! Scheduler capability: accepts one job at a time and hands back its id.
//!
//! Implementations:
//! - `batch::BatchScheduler`: AWS Batch `SubmitJob`
//! - `dry_run::DryRunScheduler`: mints ids locally, contacts nothing

pub mod batch;
pub mod dry_run;
#[cfg(test)]
pub mod testing;

pub use batch::BatchScheduler;
pub use dry_run::DryRunScheduler;

use std::collections::BTreeMap;
use thiserror::Error;

/// One submission call.
#[derive(Debug, Clone, Copy)]
pub struct SubmitRequest<'a> {
    pub name: &'a str,
    pub queue: &'a str,
    pub definition: &'a str,
    pub parameters: &'a BTreeMap<String, String>,
    /// Ids of prerequisites already accepted by the scheduler, in `dependsOn` order.
    pub dependency_ids: &'a [String],
}

#[derive(Debug, Clone, Error)]
pub enum SchedulerError {
    #[error("scheduler rejected the job: {0}")]
    Rejected(String),

    #[error("could not reach the scheduler: {0}")]
    Transport(String),

    #[error("unexpected scheduler response: {0}")]
    MalformedResponse(String),
}

pub trait Scheduler {
    /// Submit a single job and return the scheduler-issued identifier.
    fn submit(&self, request: &SubmitRequest<'_>) -> Result<String, SchedulerError>;
}
