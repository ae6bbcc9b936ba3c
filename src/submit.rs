//! Ordered submission: one scheduler call per job, stop at the first failure.
//!
//! Dependents are wired to the ids their prerequisites were issued, so the
//! scheduler itself enforces run-time ordering. Nothing accepted is ever
//! withdrawn; on failure the caller gets exactly what went through.

use crate::error::SubmitError;
use crate::scheduler::{Scheduler, SubmitRequest};
use crate::spec::ResolvedOrder;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{Span, error, info};

/// Job name -> scheduler-issued id, in submission order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionRecord(IndexMap<String, String>);

impl SubmissionRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries are never overwritten; a second insert for a name is ignored.
    fn record(&mut self, name: &str, job_id: String) {
        self.0.entry(name.to_string()).or_insert(job_id);
    }
}

pub struct SubmissionEngine<'a> {
    scheduler: &'a dyn Scheduler,
    span: Span,
}

impl<'a> SubmissionEngine<'a> {
    pub fn new(scheduler: &'a dyn Scheduler, span: Span) -> Self {
        Self { scheduler, span }
    }

    pub fn submit(&self, order: &ResolvedOrder) -> Result<SubmissionRecord, SubmitError> {
        let _entered = self.span.enter();
        let mut record = SubmissionRecord::default();

        for job in order {
            if record.contains(&job.name) {
                continue;
            }

            let mut dependency_ids = Vec::with_capacity(job.depends_on.len());
            for dep in &job.depends_on {
                match record.get(dep) {
                    Some(id) => dependency_ids.push(id.to_string()),
                    // Unreachable for orders built by GraphResolver.
                    None => {
                        return Err(SubmitError::UnresolvedDependency {
                            job: job.name.clone(),
                            missing: dep.clone(),
                        });
                    }
                }
            }

            let request = SubmitRequest {
                name: &job.name,
                queue: &job.queue,
                definition: &job.definition,
                parameters: &job.parameters,
                dependency_ids: &dependency_ids,
            };

            match self.scheduler.submit(&request) {
                Ok(job_id) => {
                    info!(
                        job = %job.name,
                        job_id = %job_id,
                        queue = %job.queue,
                        depends_on = ?dependency_ids,
                        "job submitted"
                    );
                    record.record(&job.name, job_id);
                }
                Err(source) => {
                    error!(
                        job = %job.name,
                        error = %source,
                        submitted = record.len(),
                        remaining = order.len() - record.len() - 1,
                        "job submission failed, halting batch"
                    );
                    return Err(SubmitError::SchedulerSubmission {
                        job: job.name.clone(),
                        partial: record,
                        source,
                    });
                }
            }
        }

        Ok(record)
    }
}
