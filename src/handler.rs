//! The image resize handler.
//!
//! For every record of a notification batch, in order: fetch the source
//! object, decode it, stretch it to 100x100, re-encode as JPEG and write it
//! to the destination bucket under `resized-{key}`. The first failure aborts
//! the batch; outputs already written are left in place.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thumbforge_common::{Error, ObjectRef, Result};

use crate::config::BucketConfig;
use crate::event::{NotificationBatch, NotificationRecord};
use crate::images::{self, JPEG_CONTENT_TYPE};
use crate::store::ObjectStore;

/// Prefix prepended to the source key to form the destination key.
pub const DESTINATION_KEY_PREFIX: &str = "resized-";

/// Message returned once every record of a batch has been processed.
pub const SUCCESS_MESSAGE: &str = "Image resized and uploaded successfully";

/// Response returned to the trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded message string.
    pub body: String,
}

impl HandlerResponse {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: serde_json::Value::from(SUCCESS_MESSAGE).to_string(),
        }
    }
}

/// Resizes newly stored images into the destination bucket.
pub struct ImageResizeHandler {
    source: Arc<dyn ObjectStore>,
    destination: Arc<dyn ObjectStore>,
    destination_bucket: String,
    expected_source: Option<String>,
}

impl ImageResizeHandler {
    /// Create a handler that reads through `source` and writes into
    /// `destination_bucket` through `destination`.
    pub fn new(
        source: Arc<dyn ObjectStore>,
        destination: Arc<dyn ObjectStore>,
        destination_bucket: impl Into<String>,
    ) -> Self {
        Self {
            source,
            destination,
            destination_bucket: destination_bucket.into(),
            expected_source: None,
        }
    }

    /// Create a handler from the bucket section of the configuration.
    pub fn from_config(
        buckets: &BucketConfig,
        source: Arc<dyn ObjectStore>,
        destination: Arc<dyn ObjectStore>,
    ) -> Self {
        Self::new(source, destination, buckets.destination.clone())
            .with_expected_source(buckets.source.clone())
    }

    /// Reject records whose bucket differs from `bucket`.
    #[must_use]
    pub fn with_expected_source(mut self, bucket: Option<String>) -> Self {
        self.expected_source = bucket;
        self
    }

    pub fn destination_bucket(&self) -> &str {
        &self.destination_bucket
    }

    /// Process every record of `batch` in order.
    ///
    /// Returns the fixed success response once all records are written, or
    /// the first error encountered. Records after a failing one are not
    /// touched.
    #[tracing::instrument(skip(self, batch), fields(records = batch.len()))]
    pub async fn handle(&self, batch: &NotificationBatch) -> Result<HandlerResponse> {
        tracing::debug!(
            "Handling batch via {} -> {}",
            self.source.name(),
            self.destination.name()
        );

        for (index, record) in batch.records.iter().enumerate() {
            let written = self.process_record(record).await.map_err(|e| {
                tracing::error!("Record {} of {} failed: {}", index + 1, batch.len(), e);
                e
            })?;
            tracing::info!("Wrote {}", written);
        }

        Ok(HandlerResponse::success())
    }

    /// Run one record through retrieve, decode, resize, encode and store.
    ///
    /// Returns the destination object that was written.
    pub async fn process_record(&self, record: &NotificationRecord) -> Result<ObjectRef> {
        let source = self.source_ref(record)?;

        let data = self.source.get(&source).await?;
        tracing::debug!("Retrieved {} ({} bytes)", source, data.len());

        let jpeg = images::resize_to_jpeg(&source, &data)?;

        let destination = source.derive(self.destination_bucket.as_str(), DESTINATION_KEY_PREFIX);
        self.destination
            .put(&destination, Bytes::from(jpeg), JPEG_CONTENT_TYPE)
            .await?;

        Ok(destination)
    }

    fn source_ref(&self, record: &NotificationRecord) -> Result<ObjectRef> {
        let source = record.object_ref();

        if source.location.is_empty() || source.key.is_empty() {
            return Err(Error::invalid_record(format!(
                "record must name a bucket and a key, got {:?}",
                source
            )));
        }

        if let Some(expected) = &self.expected_source {
            if &source.location != expected {
                return Err(Error::invalid_record(format!(
                    "record for bucket '{}' but handler reads from '{}'",
                    source.location, expected
                )));
            }
        }

        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreOp};
    use assert_matches::assert_matches;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn handler(store: &MemoryStore) -> ImageResizeHandler {
        let store: Arc<dyn ObjectStore> = Arc::new(store.clone());
        ImageResizeHandler::new(store.clone(), store, "out")
    }

    #[test]
    fn test_success_response_shape() {
        let json = serde_json::to_value(HandlerResponse::success()).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(
            json["body"],
            "\"Image resized and uploaded successfully\""
        );
    }

    #[tokio::test]
    async fn test_process_record_writes_prefixed_key() {
        let store = MemoryStore::new();
        store.insert(ObjectRef::new("in", "photo.png"), png(30, 20), "image/png");

        let written = handler(&store)
            .process_record(&NotificationRecord::new("in", "photo.png"))
            .await
            .unwrap();

        assert_eq!(written, ObjectRef::new("out", "resized-photo.png"));
        let stored = store.object(&written).unwrap();
        assert_eq!(stored.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_empty_key_is_invalid_record() {
        let store = MemoryStore::new();
        let err = handler(&store)
            .process_record(&NotificationRecord::new("in", ""))
            .await
            .unwrap_err();
        assert_matches!(err, Error::InvalidRecord(_));
        assert!(store.ops().is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_source_bucket_is_rejected() {
        let store = MemoryStore::new();
        store.insert(ObjectRef::new("elsewhere", "a.png"), png(4, 4), "image/png");

        let handler = handler(&store).with_expected_source(Some("in".into()));
        let err = handler
            .process_record(&NotificationRecord::new("elsewhere", "a.png"))
            .await
            .unwrap_err();

        assert_matches!(err, Error::InvalidRecord(_));
        assert!(store.ops().is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_skips_write() {
        let store = MemoryStore::new();
        store.insert(ObjectRef::new("in", "notes.txt"), &b"hello"[..], "text/plain");

        let err = handler(&store)
            .process_record(&NotificationRecord::new("in", "notes.txt"))
            .await
            .unwrap_err();

        assert_matches!(err, Error::Decode { .. });
        assert_eq!(
            store.ops(),
            vec![StoreOp::Get(ObjectRef::new("in", "notes.txt"))]
        );
    }

    #[tokio::test]
    async fn test_empty_batch_succeeds_without_io() {
        let store = MemoryStore::new();
        let response = handler(&store)
            .handle(&NotificationBatch::default())
            .await
            .unwrap();
        assert_eq!(response, HandlerResponse::success());
        assert!(store.ops().is_empty());
    }
}
