//! S3 (and S3-compatible) object store.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::{join_url, ObjectStore, StorageError, StoredObject};

/// Connection settings for [`S3ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services. Enables path-style
    /// addressing when set.
    pub endpoint: Option<String>,
    /// Base URL objects are publicly reachable under.
    pub public_base_url: String,
}

impl S3Config {
    /// Virtual-hosted-style AWS URL for a bucket.
    pub fn default_public_base_url(bucket: &str, region: &str) -> String {
        format!("https://{bucket}.s3.{region}.amazonaws.com")
    }
}

/// Object store backed by an S3 bucket. Credentials come from the standard
/// AWS provider chain (env vars, profile, instance role).
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    /// Build the SDK client from the ambient AWS configuration.
    pub async fn connect(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.endpoint.is_some())
            .build();

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = config.endpoint.as_deref().unwrap_or("aws"),
            "S3 object store configured",
        );

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
            public_base_url: config.public_base_url,
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        if key.is_empty() || key.starts_with('/') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(e).to_string()))?;

        tracing::debug!(bucket = %self.bucket, key, size, "Object uploaded to S3");

        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
        })
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_public_base_url_is_virtual_hosted() {
        assert_eq!(
            S3Config::default_public_base_url("media", "ap-south-1"),
            "https://media.s3.ap-south-1.amazonaws.com"
        );
    }
}
