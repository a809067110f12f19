use vcs_types::{ObjectId, ObjectKind};

use crate::error::{StoreError, StoreResult};
use crate::object::Object;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. Content-addressing guarantees this:
///   the same kind and payload always produce the same ID.
/// - The ID is the digest of the framed bytes, header included.
/// - `put` of an object that is already present is a successful no-op.
/// - The store never interprets object contents.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Store a payload and return its content-addressed ID.
    fn put(&self, kind: ObjectKind, payload: &[u8]) -> StoreResult<ObjectId>;

    /// Read an object by ID.
    ///
    /// Fails with `NotFound` if the object does not exist, `CorruptObject`
    /// if the stored block does not decompress, and `MalformedObject` if
    /// the decompressed header is invalid.
    fn get(&self, id: &ObjectId) -> StoreResult<Object>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object by its textual ID.
    ///
    /// The ID is validated before the backend is touched, so malformed input
    /// always fails with `InvalidObjectId`.
    fn get_hex(&self, hex: &str) -> StoreResult<Object> {
        let id = ObjectId::from_hex(hex).map_err(StoreError::InvalidObjectId)?;
        self.get(&id)
    }

    /// Store an already-built object.
    fn put_object(&self, object: &Object) -> StoreResult<ObjectId> {
        self.put(object.kind, &object.data)
    }

    /// Write multiple objects and return their IDs, stopping at the first
    /// failure.
    fn put_batch(&self, objects: &[Object]) -> StoreResult<Vec<ObjectId>> {
        objects.iter().map(|obj| self.put_object(obj)).collect()
    }
}
