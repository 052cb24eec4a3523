//! Key-addressed object stores.
//!
//! The resize handler reads sources and writes outputs through
//! [`ObjectStore`], so S3, a local directory tree or an in-memory map can
//! back either side.

mod local;
mod memory;
mod s3;

pub use local::LocalStore;
pub use memory::{MemoryStore, StoreOp};
pub use s3::S3Store;

use async_trait::async_trait;
use bytes::Bytes;
use thumbforge_common::{ObjectRef, Result};

/// Retrieve-by-key and store-by-key access to a binary object repository.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the whole object into memory.
    ///
    /// Fails with `Error::Retrieval` when the object does not exist or the
    /// store cannot be reached.
    async fn get(&self, object: &ObjectRef) -> Result<Bytes>;

    /// Write `body` under `object`, replacing any existing object.
    ///
    /// Fails with `Error::Storage` when the write is rejected or the store
    /// cannot be reached.
    async fn put(&self, object: &ObjectRef, body: Bytes, content_type: &str) -> Result<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
