//! Spec layer: request/job JSON schemas + validated in-memory structures.
//!
//! This module is intentionally separate from fetching and submission.
//! It owns:
//! - Request + Validator (which source mode was asked for)
//! - SpecLocation (external job list reference)
//! - Job / JobBatch (validated jobs)
//! - GraphResolver (submission order)

pub mod dag;
pub mod job;
pub mod path;
pub mod request;

pub use dag::{GraphResolver, ResolvedOrder};
pub use job::{Job, JobBatch, JobSpec};
pub use path::SpecLocation;
pub use request::{Request, SpecMode, Validator};
