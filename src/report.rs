//! Response rendering for a finished (or halted) submission.

use crate::error::SubmitError;
use crate::spec::ResolvedOrder;
use crate::submit::SubmissionRecord;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    #[serde(rename = "Body")]
    pub body: String,
}

/// `{"Body": "Job(s) submitted: {...}"}`
pub fn render_success(record: &SubmissionRecord) -> Response {
    Response {
        body: format!("Job(s) submitted: {}", render_mapping(record)),
    }
}

/// Human-readable failure report. For submission failures this always names
/// the failing job and lists what the scheduler had already accepted.
pub fn render_failure(err: &SubmitError) -> String {
    match err {
        SubmitError::SchedulerSubmission {
            job,
            partial,
            source,
        } => format!(
            "Failed to submit job {}: {}\nJob(s) submitted before failure: {}",
            job,
            source,
            render_mapping(partial)
        ),
        other => format!("Failed before any job was submitted: {}", other),
    }
}

/// One line per job: position, name, queue, prerequisites.
pub fn render_plan(order: &ResolvedOrder) -> String {
    let mut out = String::new();
    for (i, job) in order.jobs().iter().enumerate() {
        let _ = write!(out, "{:>3}. {} (queue {})", i + 1, job.name, job.queue);
        if !job.depends_on.is_empty() {
            let _ = write!(out, " after {}", job.depends_on.join(", "));
        }
        out.push('\n');
    }
    out
}

fn render_mapping(record: &SubmissionRecord) -> String {
    // IndexMap of strings cannot fail to serialize.
    serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
}
