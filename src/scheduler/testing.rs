//! Recording scheduler for tests.

use crate::scheduler::{Scheduler, SchedulerError, SubmitRequest};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub name: String,
    pub queue: String,
    pub definition: String,
    pub parameters: BTreeMap<String, String>,
    pub dependency_ids: Vec<String>,
}

/// Issues `id-<name>` for every job, except `fail_on`, which is rejected.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub calls: RefCell<Vec<RecordedCall>>,
    pub fail_on: Option<String>,
}

impl RecordingScheduler {
    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.name.clone()).collect()
    }

    pub fn call(&self, name: &str) -> Option<RecordedCall> {
        self.calls.borrow().iter().find(|c| c.name == name).cloned()
    }
}

impl Scheduler for RecordingScheduler {
    fn submit(&self, request: &SubmitRequest<'_>) -> Result<String, SchedulerError> {
        self.calls.borrow_mut().push(RecordedCall {
            name: request.name.to_string(),
            queue: request.queue.to_string(),
            definition: request.definition.to_string(),
            parameters: request.parameters.clone(),
            dependency_ids: request.dependency_ids.to_vec(),
        });
        if self.fail_on.as_deref() == Some(request.name) {
            return Err(SchedulerError::Rejected(format!("queue refused {}", request.name)));
        }
        Ok(format!("id-{}", request.name))
    }
}
