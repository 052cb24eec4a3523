//! Wire types for "object created" notification batches.
//!
//! The shape follows the S3 event notification JSON. Only the fields the
//! resize handler reads are modelled; serde ignores the rest (eventName,
//! eTag, requestParameters, ...).

use serde::{Deserialize, Serialize};
use thumbforge_common::ObjectRef;

/// An ordered batch of notification records, as delivered by the trigger.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotificationBatch {
    #[serde(rename = "Records")]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Bucket {
    pub name: String,
}

/// The created object.
///
/// S3 URL-encodes `key` in notifications (a space arrives as `+`). The key is
/// used exactly as delivered, without decoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Object {
    pub key: String,
}

impl NotificationBatch {
    /// Build a batch from `(bucket, key)` pairs.
    pub fn from_objects<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            records: objects
                .into_iter()
                .map(|(bucket, key)| NotificationRecord::new(bucket, key))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl NotificationRecord {
    pub fn new(bucket: &str, key: &str) -> Self {
        Self {
            s3: S3Entity {
                bucket: S3Bucket {
                    name: bucket.to_string(),
                },
                object: S3Object {
                    key: key.to_string(),
                },
            },
        }
    }

    /// The stored object this record announces.
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef::new(self.s3.bucket.name.as_str(), self.s3.object.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S3_PUT_EVENT: &str = r#"{
        "Records": [
            {
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-05-01T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "resize-on-upload",
                    "bucket": {
                        "name": "in",
                        "arn": "arn:aws:s3:::in"
                    },
                    "object": {
                        "key": "photo.png",
                        "size": 1024,
                        "eTag": "0123456789abcdef0123456789abcdef",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            },
            {
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": "in" },
                    "object": { "key": "albums/cat.jpg" }
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_s3_event() {
        let batch: NotificationBatch = serde_json::from_str(S3_PUT_EVENT).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.records[0].object_ref(), ObjectRef::new("in", "photo.png"));
        assert_eq!(
            batch.records[1].object_ref(),
            ObjectRef::new("in", "albums/cat.jpg")
        );
    }

    #[test]
    fn test_empty_records() {
        let batch: NotificationBatch = serde_json::from_str(r#"{"Records": []}"#).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let json = r#"{"Records": [{"s3": {"bucket": {"name": "in"}, "object": {}}}]}"#;
        assert!(serde_json::from_str::<NotificationBatch>(json).is_err());
    }

    #[test]
    fn test_missing_records_field_is_rejected() {
        assert!(serde_json::from_str::<NotificationBatch>(r#"{"records": []}"#).is_err());
    }

    #[test]
    fn test_from_objects_preserves_order() {
        let batch = NotificationBatch::from_objects([("in", "a.png"), ("in", "b.png")]);
        let keys: Vec<_> = batch.records.iter().map(|r| r.s3.object.key.as_str()).collect();
        assert_eq!(keys, vec!["a.png", "b.png"]);
    }
}
