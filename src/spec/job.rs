//! Job objects as they appear in a request (inline `jobs` or a fetched document).
//!
//! JSON shape:
//! {
//!   "jobName": "transform",          // unique within the batch
//!   "jobQueue": "etl-queue",
//!   "jobDefinition": "transform:3",
//!   "parameters": {"day": 14},       // optional, values coerced to strings
//!   "dependsOn": ["extract"]         // optional, names of jobs in the same batch
//! }

use crate::error::SubmitError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Raw job shape as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    pub job_name: String,
    pub job_queue: String,
    pub job_definition: String,

    #[serde(default)]
    pub parameters: Option<BTreeMap<String, Value>>,

    #[serde(default)]
    pub depends_on: Option<Vec<String>>,
}

/// Normalized job ready for resolution and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub queue: String,
    pub definition: String,
    pub parameters: BTreeMap<String, String>,
    /// Distinct dependency names, in declaration order.
    pub depends_on: Vec<String>,
}

impl From<JobSpec> for Job {
    fn from(spec: JobSpec) -> Self {
        let parameters = spec
            .parameters
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, coerce_parameter(&v)))
            .collect();

        let mut seen = HashSet::new();
        let depends_on = spec
            .depends_on
            .unwrap_or_default()
            .into_iter()
            .filter(|dep| seen.insert(dep.clone()))
            .collect();

        Job {
            name: spec.job_name,
            queue: spec.job_queue,
            definition: spec.job_definition,
            parameters,
            depends_on,
        }
    }
}

/// Schedulers only take string parameters. Strings pass through untouched;
/// everything else is rendered as its JSON text (`3`, `true`, `null`, ...).
pub fn coerce_parameter(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// All jobs submitted together, in input order. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct JobBatch {
    jobs: Vec<Job>,
}

impl JobBatch {
    pub fn from_specs(specs: Vec<JobSpec>) -> Result<Self, SubmitError> {
        let mut names = HashSet::new();
        let mut jobs = Vec::with_capacity(specs.len());
        for spec in specs {
            if !names.insert(spec.job_name.clone()) {
                return Err(SubmitError::DuplicateJob(spec.job_name));
            }
            jobs.push(Job::from(spec));
        }
        Ok(JobBatch { jobs })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub(crate) fn into_jobs(self) -> Vec<Job> {
        self.jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(json: &str) -> JobSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn mixed_parameter_values_become_strings() {
        let job = Job::from(spec(
            r#"{"jobName": "a", "jobQueue": "q", "jobDefinition": "d",
                "parameters": {"count": 3, "verbose": true, "ratio": 0.5, "label": "x y", "Mixed_Key": null}}"#,
        ));
        let expected: BTreeMap<String, String> = [
            ("Mixed_Key", "null"),
            ("count", "3"),
            ("label", "x y"),
            ("ratio", "0.5"),
            ("verbose", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(job.parameters, expected);
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let job = Job::from(spec(
            r#"{"jobName": "a", "jobQueue": "q", "jobDefinition": "d", "parameters": null}"#,
        ));
        assert!(job.parameters.is_empty());
        assert!(job.depends_on.is_empty());
    }

    #[test]
    fn repeated_dependencies_collapse() {
        let job = Job::from(spec(
            r#"{"jobName": "c", "jobQueue": "q", "jobDefinition": "d", "dependsOn": ["b", "a", "b"]}"#,
        ));
        assert_eq!(job.depends_on, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let err = serde_json::from_str::<JobSpec>(r#"{"jobName": "a", "jobQueue": "q"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("jobDefinition"), "{}", err);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let specs = vec![
            spec(r#"{"jobName": "a", "jobQueue": "q", "jobDefinition": "d"}"#),
            spec(r#"{"jobName": "a", "jobQueue": "q2", "jobDefinition": "d2"}"#),
        ];
        match JobBatch::from_specs(specs) {
            Err(SubmitError::DuplicateJob(name)) => assert_eq!(name, "a"),
            other => panic!("expected DuplicateJob, got {:?}", other),
        }
    }
}
