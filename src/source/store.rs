//! Spec source backed by S3 (`aws-sdk-s3`) or the local filesystem (`object_store`).

use crate::error::SubmitError;
use crate::source::SpecSource;
use crate::spec::SpecLocation;
use aws_sdk_s3::error::DisplayErrorContext;
use object_store::ObjectStore;
use object_store::local::LocalFileSystem;
use object_store::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

pub struct SpecStore {
    runtime: Arc<Runtime>,
    s3: aws_sdk_s3::Client,
}

impl SpecStore {
    pub fn new(runtime: Arc<Runtime>, s3: aws_sdk_s3::Client) -> Self {
        Self { runtime, s3 }
    }

    /// S3 keys are passed through verbatim; no path normalisation.
    fn read_s3(&self, bucket: &str, key: &str) -> Result<Vec<u8>, String> {
        self.runtime.block_on(async {
            let output = self
                .s3
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| DisplayErrorContext(&e).to_string())?;
            let bytes = output.body.collect().await.map_err(|e| e.to_string())?;
            Ok::<_, String>(bytes.into_bytes().to_vec())
        })
    }

    fn read_file(&self, path: &std::path::Path) -> Result<Vec<u8>, String> {
        let object = Path::from_filesystem_path(path).map_err(|e| e.to_string())?;
        let store = LocalFileSystem::new();
        self.runtime.block_on(async {
            let bytes = store
                .get(&object)
                .await
                .map_err(|e| e.to_string())?
                .bytes()
                .await
                .map_err(|e| e.to_string())?;
            Ok::<_, String>(bytes.to_vec())
        })
    }
}

impl SpecSource for SpecStore {
    fn fetch(&self, location: &SpecLocation) -> Result<Vec<u8>, SubmitError> {
        let bytes = match location {
            SpecLocation::S3 { bucket, key } => {
                info!(bucket = %bucket, key = %key, "fetching job spec from S3");
                self.read_s3(bucket, key)
            }
            SpecLocation::File(path) => {
                info!(path = %path.display(), "reading job spec from local file");
                self.read_file(path)
            }
        }
        .map_err(|reason| SubmitError::SpecFetch {
            location: location.to_string(),
            reason,
        })?;

        info!(bytes = bytes.len(), "job spec fetched");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
    use aws_smithy_runtime::client::http::test_util::capture_request;

    fn runtime() -> Arc<Runtime> {
        Arc::new(
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap(),
        )
    }

    fn s3_config() -> aws_sdk_s3::config::Builder {
        aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
    }

    fn offline_store() -> SpecStore {
        SpecStore::new(runtime(), aws_sdk_s3::Client::from_conf(s3_config().build()))
    }

    #[test]
    fn s3_key_is_requested_verbatim() {
        let (http_client, captured) = capture_request(None);
        let config = s3_config()
            .endpoint_url("http://localhost:4566")
            .force_path_style(true)
            .http_client(http_client)
            .build();
        let store = SpecStore::new(runtime(), aws_sdk_s3::Client::from_conf(config));

        let location: SpecLocation = "s3://jobs-bucket/specs/nightly~v2.json".parse().unwrap();
        let bytes = store.fetch(&location).unwrap();
        assert!(bytes.is_empty());

        let request = captured.expect_request();
        assert!(
            request.uri().contains("/jobs-bucket/specs/nightly~v2.json"),
            "{}",
            request.uri()
        );
    }

    #[test]
    fn reads_local_file() {
        let dir = std::env::temp_dir().join(format!("batch-chain-store-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("batch.json");
        std::fs::write(&file, br#"[{"jobName": "a", "jobQueue": "q", "jobDefinition": "d"}]"#).unwrap();

        let bytes = offline_store().fetch(&SpecLocation::File(file)).unwrap();
        assert!(bytes.starts_with(b"[{"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_local_file_is_a_fetch_error() {
        let missing = SpecLocation::File(std::env::temp_dir().join("batch-chain-does-not-exist.json"));
        let err = offline_store().fetch(&missing).unwrap_err();
        assert!(matches!(err, SubmitError::SpecFetch { .. }), "{:?}", err);
    }
}
