use vcs_types::{ObjectId, TypeError};

use crate::framing::FrameError;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The identifier is not well-formed fixed-length hex.
    #[error("invalid object id: {0}")]
    InvalidObjectId(#[source] TypeError),

    /// No stored block exists for the requested object.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The stored bytes are not a valid compressed block.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: ObjectId, reason: String },

    /// The block decompressed but its header is missing or inconsistent.
    #[error("malformed object {id}: {source}")]
    MalformedObject {
        id: ObjectId,
        #[source]
        source: FrameError,
    },

    /// The block decoded cleanly but does not hash to its own id.
    #[error("hash mismatch for {id}: content hashes to {computed}")]
    HashMismatch { id: ObjectId, computed: ObjectId },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
