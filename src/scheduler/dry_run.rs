//! Scheduler stand-in for rehearsing a batch: every job is "accepted" with a
//! fresh UUID and nothing leaves the process.

use crate::scheduler::{Scheduler, SchedulerError, SubmitRequest};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct DryRunScheduler;

impl Scheduler for DryRunScheduler {
    fn submit(&self, request: &SubmitRequest<'_>) -> Result<String, SchedulerError> {
        let job_id = Uuid::new_v4().to_string();
        info!(
            job = request.name,
            queue = request.queue,
            definition = request.definition,
            parameters = ?request.parameters,
            depends_on = ?request.dependency_ids,
            job_id = %job_id,
            "dry run: job not sent"
        );
        Ok(job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn issues_distinct_ids() {
        let parameters = BTreeMap::new();
        let request = SubmitRequest {
            name: "a",
            queue: "q",
            definition: "d",
            parameters: &parameters,
            dependency_ids: &[],
        };
        let first = DryRunScheduler.submit(&request).unwrap();
        let second = DryRunScheduler.submit(&request).unwrap();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
