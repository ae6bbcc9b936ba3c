//! External job list reference.
//!
//! Example: "s3://bucket/specs/nightly.json" => S3 { bucket, key: "specs/nightly.json" }
//!
//! `file://` references are read from the local filesystem, which is handy for
//! rehearsing a batch before uploading it.

use anyhow::{Context, bail};
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecLocation {
    S3 { bucket: String, key: String },
    File(PathBuf),
}

impl FromStr for SpecLocation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let re = Regex::new(r"^([a-z][a-z0-9+.-]*)://(.*)$")?;
        let caps = re
            .captures(s.trim())
            .with_context(|| format!("reference must look like scheme://...: {:?}", s))?;

        let scheme = &caps[1];
        let rest = &caps[2];
        match scheme {
            "s3" | "s3a" => {
                let (bucket, key) = rest
                    .split_once('/')
                    .with_context(|| format!("s3 reference has no key: {:?}", s))?;
                if bucket.is_empty() {
                    bail!("s3 reference has an empty bucket: {:?}", s);
                }
                if key.is_empty() {
                    bail!("s3 reference has an empty key: {:?}", s);
                }
                Ok(SpecLocation::S3 {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            "file" => {
                if rest.is_empty() {
                    bail!("file reference has an empty path: {:?}", s);
                }
                Ok(SpecLocation::File(PathBuf::from(rest)))
            }
            other => bail!("unsupported reference scheme {:?} in {:?}", other, s),
        }
    }
}

impl fmt::Display for SpecLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecLocation::S3 { bucket, key } => write!(f, "s3://{}/{}", bucket, key),
            SpecLocation::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_s3_bucket_and_nested_key() {
        let loc: SpecLocation = "s3://jobs-bucket/specs/2024/nightly.json".parse().unwrap();
        assert_eq!(
            loc,
            SpecLocation::S3 {
                bucket: "jobs-bucket".to_string(),
                key: "specs/2024/nightly.json".to_string(),
            }
        );
        assert_eq!(loc.to_string(), "s3://jobs-bucket/specs/2024/nightly.json");
    }

    #[test]
    fn parses_file_reference() {
        let loc: SpecLocation = "file:///tmp/batch.json".parse().unwrap();
        assert_eq!(loc, SpecLocation::File(PathBuf::from("/tmp/batch.json")));
    }

    #[test]
    fn rejects_bad_references() {
        for bad in ["jobs.json", "s3://bucket-only", "s3:///key", "s3://bucket/", "ftp://h/x"] {
            assert!(bad.parse::<SpecLocation>().is_err(), "{} should not parse", bad);
        }
    }
}
