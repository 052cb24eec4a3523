//! In-memory object store.
//!
//! Records every operation in order, which makes it the store of choice for
//! tests asserting on what the handler read and wrote.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use thumbforge_common::{Error, ObjectRef, Result};

use super::ObjectStore;

/// One operation observed by a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Get(ObjectRef),
    Put(ObjectRef),
}

/// A stored object together with its content type.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

#[derive(Default)]
struct Inner {
    objects: HashMap<ObjectRef, StoredObject>,
    ops: Vec<StoreOp>,
    unreachable: HashSet<String>,
    read_only: HashSet<String>,
}

/// Thread-safe in-memory store. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without recording an operation.
    pub fn insert(&self, object: ObjectRef, body: impl Into<Bytes>, content_type: &str) {
        self.inner.lock().objects.insert(
            object,
            StoredObject {
                body: body.into(),
                content_type: content_type.to_string(),
            },
        );
    }

    /// Fetch an object without recording an operation.
    pub fn object(&self, object: &ObjectRef) -> Option<StoredObject> {
        self.inner.lock().objects.get(object).cloned()
    }

    /// All keys held in `location`, sorted.
    pub fn keys(&self, location: &str) -> Vec<String> {
        let inner = self.inner.lock();
        let mut keys: Vec<String> = inner
            .objects
            .keys()
            .filter(|o| o.location == location)
            .map(|o| o.key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Operations performed through [`ObjectStore`], in call order.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.lock().ops.clone()
    }

    /// Make every call against `location` fail as if the store were down.
    pub fn set_unreachable(&self, location: &str) {
        self.inner.lock().unreachable.insert(location.to_string());
    }

    /// Reject writes to `location`.
    pub fn set_read_only(&self, location: &str) {
        self.inner.lock().read_only.insert(location.to_string());
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, object: &ObjectRef) -> Result<Bytes> {
        let mut inner = self.inner.lock();
        inner.ops.push(StoreOp::Get(object.clone()));

        if inner.unreachable.contains(&object.location) {
            return Err(Error::retrieval(object, "store unreachable"));
        }

        inner
            .objects
            .get(object)
            .map(|stored| stored.body.clone())
            .ok_or_else(|| Error::retrieval(object, "no such key"))
    }

    async fn put(&self, object: &ObjectRef, body: Bytes, content_type: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ops.push(StoreOp::Put(object.clone()));

        if inner.unreachable.contains(&object.location) {
            return Err(Error::storage(object, "store unreachable"));
        }
        if inner.read_only.contains(&object.location) {
            return Err(Error::storage(object, "write rejected"));
        }

        inner.objects.insert(
            object.clone(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
