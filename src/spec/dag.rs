//! Job dependency graph resolution.
//!
//! The graph is induced by `dependsOn` edges inside one batch. Resolution is
//! Kahn's algorithm over input positions:
//! - in-degree = number of distinct dependencies
//! - ready jobs leave the queue front-first, newly ready jobs join at the back
//! - ties are broken by input order only
//!
//! Anything left with a positive in-degree once the queue drains is on (or
//! behind) a cycle, which is reported instead of waiting forever.

use crate::error::SubmitError;
use crate::spec::{Job, JobBatch};
use std::collections::{HashMap, VecDeque};
use tracing::{Span, debug, info};

/// Jobs in a valid submission order: every dependency precedes its dependents.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOrder {
    jobs: Vec<Job>,
}

impl ResolvedOrder {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn names(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedOrder {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

pub struct GraphResolver {
    span: Span,
}

impl GraphResolver {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Validate references, then order the batch. Fails rather than returning
    /// a partial order.
    pub fn resolve(&self, batch: JobBatch) -> Result<ResolvedOrder, SubmitError> {
        let _entered = self.span.enter();

        let jobs = batch.into_jobs();
        let order = plan_positions(&jobs)?;

        let mut slots: Vec<Option<Job>> = jobs.into_iter().map(Some).collect();
        let resolved = ResolvedOrder {
            jobs: order.iter().filter_map(|&pos| slots[pos].take()).collect(),
        };

        info!(
            jobs = resolved.len(),
            order = ?resolved.names(),
            "resolved submission order"
        );
        Ok(resolved)
    }
}

/// Input positions in submission order.
fn plan_positions(jobs: &[Job]) -> Result<Vec<usize>, SubmitError> {
    // 1) Position index by name (names are unique per JobBatch).
    let index: HashMap<&str, usize> = jobs
        .iter()
        .enumerate()
        .map(|(pos, job)| (job.name.as_str(), pos))
        .collect();

    // 2) Every reference must exist before anything is ordered.
    for job in jobs {
        for dep in &job.depends_on {
            if !index.contains_key(dep.as_str()) {
                return Err(SubmitError::UnresolvedDependency {
                    job: job.name.clone(),
                    missing: dep.clone(),
                });
            }
        }
    }

    // 3) In-degrees and reverse edges. Dependents lists stay in input order.
    let mut in_degree: Vec<usize> = jobs.iter().map(|j| j.depends_on.len()).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); jobs.len()];
    for (pos, job) in jobs.iter().enumerate() {
        for dep in &job.depends_on {
            dependents[index[dep.as_str()]].push(pos);
        }
    }

    // 4) Drain the ready queue.
    let mut ready: VecDeque<usize> = (0..jobs.len()).filter(|&pos| in_degree[pos] == 0).collect();
    let mut order = Vec::with_capacity(jobs.len());
    while let Some(pos) = ready.pop_front() {
        debug!(job = %jobs[pos].name, "job ready for submission");
        order.push(pos);
        for &child in &dependents[pos] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.push_back(child);
            }
        }
    }

    // 5) Termination check.
    if order.len() < jobs.len() {
        let stuck = (0..jobs.len())
            .filter(|&pos| in_degree[pos] > 0)
            .map(|pos| jobs[pos].name.clone())
            .collect();
        return Err(SubmitError::CyclicDependency { jobs: stuck });
    }

    Ok(order)
}
