//! AWS Batch scheduler.

use crate::scheduler::{Scheduler, SchedulerError, SubmitRequest};
use aws_sdk_batch::Client;
use aws_sdk_batch::error::DisplayErrorContext;
use aws_sdk_batch::operation::submit_job::SubmitJobOutput;
use aws_sdk_batch::types::JobDependency;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

pub struct BatchScheduler {
    client: Client,
    runtime: Arc<Runtime>,
}

impl BatchScheduler {
    pub fn new(config: &aws_config::SdkConfig, runtime: Arc<Runtime>) -> Self {
        Self {
            client: Client::new(config),
            runtime,
        }
    }
}

impl Scheduler for BatchScheduler {
    fn submit(&self, request: &SubmitRequest<'_>) -> Result<String, SchedulerError> {
        let depends_on: Vec<JobDependency> = request
            .dependency_ids
            .iter()
            .map(|id| JobDependency::builder().job_id(id).build())
            .collect();
        let parameters: HashMap<String, String> = request
            .parameters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut call = self
            .client
            .submit_job()
            .job_name(request.name)
            .job_queue(request.queue)
            .job_definition(request.definition)
            .set_parameters(Some(parameters));
        if !depends_on.is_empty() {
            call = call.set_depends_on(Some(depends_on));
        }

        debug!(job = request.name, queue = request.queue, "calling SubmitJob");
        let output = self
            .runtime
            .block_on(call.send())
            .map_err(|err| match err.as_service_error() {
                Some(service) => SchedulerError::Rejected(DisplayErrorContext(service).to_string()),
                None => SchedulerError::Transport(DisplayErrorContext(&err).to_string()),
            })?;

        issued_id(request.name, &output)
    }
}

fn issued_id(name: &str, output: &SubmitJobOutput) -> Result<String, SchedulerError> {
    let Some(job_id) = output.job_id().filter(|id| !id.is_empty()) else {
        return Err(SchedulerError::MalformedResponse(format!(
            "SubmitJob for {} returned no jobId",
            name
        )));
    };
    Ok(job_id.to_string())
}
