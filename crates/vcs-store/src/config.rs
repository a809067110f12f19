use serde::{Deserialize, Serialize};

use crate::codec::DEFAULT_LEVEL;

/// Configuration for an object store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// zstd level used for new blocks. Existing blocks decode regardless.
    pub compression_level: i32,
    /// Whether to `fsync` each block before renaming it into place.
    pub fsync: bool,
    /// When `true`, `put` on an already-present object decodes and re-hashes
    /// the existing block and rewrites it if it no longer matches its id.
    /// Costs one extra read per duplicate write.
    pub verify_existing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_LEVEL,
            fsync: true,
            verify_existing: false,
        }
    }
}

impl StoreConfig {
    /// A configuration that re-verifies existing blocks on every `put`.
    pub fn paranoid() -> Self {
        Self {
            verify_existing: true,
            ..Default::default()
        }
    }
}
