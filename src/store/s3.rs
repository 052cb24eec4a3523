//! Amazon S3 object store.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use thumbforge_common::{Error, ObjectRef, Result};

use super::ObjectStore;

/// S3-backed store. Locations are bucket names.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration (environment,
    /// profile, or the Lambda execution role).
    pub async fn from_env() -> Self {
        let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&shared_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, object: &ObjectRef) -> Result<Bytes> {
        tracing::debug!("GetObject s3://{}", object);

        let response = self
            .client
            .get_object()
            .bucket(&object.location)
            .key(&object.key)
            .send()
            .await
            .map_err(|e| Error::retrieval(object, DisplayErrorContext(&e).to_string()))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| Error::retrieval(object, format!("reading body: {}", e)))?;

        Ok(body.into_bytes())
    }

    async fn put(&self, object: &ObjectRef, body: Bytes, content_type: &str) -> Result<()> {
        tracing::debug!(
            "PutObject s3://{} ({} bytes, {})",
            object,
            body.len(),
            content_type
        );

        self.client
            .put_object()
            .bucket(&object.location)
            .key(&object.key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| Error::storage(object, DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
