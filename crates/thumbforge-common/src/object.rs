//! Addressing for objects held in a key-addressed store.

use serde::{Deserialize, Serialize};

/// A `(location, key)` pair identifying one stored object.
///
/// For S3 the location is the bucket name. For the filesystem store it is a
/// directory under the store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub location: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new<L: Into<String>, K: Into<String>>(location: L, key: K) -> Self {
        Self {
            location: location.into(),
            key: key.into(),
        }
    }

    /// Reference to a sibling object in another location, with `prefix`
    /// prepended to this object's key.
    #[must_use]
    pub fn derive<L: Into<String>>(&self, location: L, prefix: &str) -> Self {
        Self {
            location: location.into(),
            key: format!("{}{}", prefix, self.key),
        }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.location, self.key)
    }
}
