use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of object stored.
///
/// The tag is written verbatim into every object header, so its textual form
/// is part of the storage format. New kinds must pick a tag that contains no
/// space and no zero byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ObjectKind {
    /// Raw content (file contents, arbitrary data).
    Blob,
}

impl ObjectKind {
    /// Every kind this build understands.
    pub const ALL: &'static [ObjectKind] = &[ObjectKind::Blob];

    /// The header tag for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
        }
    }

    /// The object header for a payload of `len` bytes: `"<tag> <len>\0"`.
    pub fn header(&self, len: u64) -> Vec<u8> {
        format!("{} {len}\0", self.as_str()).into_bytes()
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TypeError::UnknownKind(s.to_string()))
    }
}
