//! Storage layout: `objects/<first 2 hex>/<remaining hex>`.
//!
//! The two-character fan-out caps any single directory at 256 entries at
//! the first level, whatever the number of objects.

use std::path::PathBuf;

use vcs_types::{ObjectId, TypeError};

/// Directory (relative to the store root) holding loose objects.
pub const OBJECTS_DIR: &str = "objects";

/// Number of hex characters used for the fan-out directory.
pub const FAN_OUT_LEN: usize = 2;

/// Split an id into its fan-out directory name and file name.
pub fn fan_out(id: &ObjectId) -> (String, String) {
    let mut hex = id.to_hex();
    let rest = hex.split_off(FAN_OUT_LEN);
    (hex, rest)
}

/// Relative path of the stored block for `id`.
pub fn path_for(id: &ObjectId) -> PathBuf {
    let (dir, file) = fan_out(id);
    [OBJECTS_DIR, dir.as_str(), file.as_str()].iter().collect()
}

/// Like [`path_for`], validating a textual identifier first.
pub fn path_for_hex(hex: &str) -> Result<PathBuf, TypeError> {
    let id = ObjectId::from_hex(hex)?;
    Ok(path_for(&id))
}
