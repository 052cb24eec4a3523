//! Filesystem-backed object store.
//!
//! Objects live at `{root}/{location}/{key}`. Keys may contain `/` and map to
//! nested directories.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thumbforge_common::{Error, ObjectRef, Result};

use super::ObjectStore;

/// Object store rooted at a local directory.
///
/// Content types are not persisted; the filesystem has nowhere to keep them.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an object to its path, refusing anything that would escape
    /// the location directory.
    pub fn path_for(&self, object: &ObjectRef) -> Result<PathBuf> {
        check_segment(&object.location, "location")?;
        if object.key.is_empty() {
            return Err(Error::invalid_record(format!("empty key in {}", object.location)));
        }

        let key = Path::new(&object.key);
        if !key.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(Error::invalid_record(format!(
                "key escapes its location: {}",
                object
            )));
        }

        Ok(self.root.join(&object.location).join(key))
    }
}

fn check_segment(segment: &str, what: &str) -> Result<()> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::invalid_record(format!("invalid {}: {:?}", what, segment))),
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn get(&self, object: &ObjectRef) -> Result<Bytes> {
        let path = self.path_for(object)?;
        tracing::debug!("Reading {} from {}", object, path.display());

        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::retrieval(object, format!("{}: {}", path.display(), e)))?;
        Ok(Bytes::from(data))
    }

    async fn put(&self, object: &ObjectRef, body: Bytes, content_type: &str) -> Result<()> {
        let path = self.path_for(object)?;
        tracing::debug!(
            "Writing {} ({} bytes, {}) to {}",
            object,
            body.len(),
            content_type,
            path.display()
        );

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::storage(object, format!("{}: {}", parent.display(), e)))?;
        }

        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| Error::storage(object, format!("{}: {}", path.display(), e)))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
