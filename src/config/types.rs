use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub buckets: BucketConfig,

    #[serde(default)]
    pub local: LocalConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BucketConfig {
    /// Bucket the notifications are expected to come from. When set, records
    /// naming any other bucket are rejected.
    #[serde(default)]
    pub source: Option<String>,

    /// Bucket the resized images are written to
    #[serde(default)]
    pub destination: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalConfig {
    /// Root directory of the filesystem store used by `thumbforge run`.
    /// Each bucket is a subdirectory.
    #[serde(default = "default_local_root")]
    pub root: PathBuf,
}

fn default_local_root() -> PathBuf {
    PathBuf::from("./buckets")
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            root: default_local_root(),
        }
    }
}
