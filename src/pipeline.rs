//! One invocation, strictly linear:
//! Validate -> FetchSpec -> Resolve -> Submit -> (report, done by the caller).
//!
//! Every structural failure happens before the first scheduler call.

use crate::error::SubmitError;
use crate::scheduler::Scheduler;
use crate::source::{SpecSource, parse_jobs};
use crate::spec::{GraphResolver, JobBatch, Request, ResolvedOrder, SpecMode, Validator};
use crate::submit::{SubmissionEngine, SubmissionRecord};
use tracing::{Span, info, info_span};

pub struct Pipeline<'a> {
    source: &'a dyn SpecSource,
    span: Span,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: &'a dyn SpecSource, span: Span) -> Self {
        Self { source, span }
    }

    /// Validate, fetch and resolve. No scheduler involved.
    pub fn plan(&self, request: Request) -> Result<ResolvedOrder, SubmitError> {
        let mode = Validator::new(self.child("validate")).validate(request)?;

        let specs = match mode {
            SpecMode::Inline(specs) => specs,
            SpecMode::External(location) => {
                let _entered = self.child("fetch_spec").entered();
                let bytes = self.source.fetch(&location)?;
                parse_jobs(&location, &bytes)?
            }
        };

        let batch = JobBatch::from_specs(specs)?;
        info!(parent: &self.span, jobs = batch.len(), "job batch loaded");
        GraphResolver::new(self.child("resolve")).resolve(batch)
    }

    /// Full run. On success every job is submitted; on a scheduler failure the
    /// error carries the jobs accepted so far.
    pub fn run(&self, request: Request, scheduler: &dyn Scheduler) -> Result<SubmissionRecord, SubmitError> {
        let order = self.plan(request)?;
        SubmissionEngine::new(scheduler, self.child("submit")).submit(&order)
    }

    fn child(&self, stage: &'static str) -> Span {
        info_span!(parent: &self.span, "stage", stage)
    }
}
