use vcs_crypto::ContentHasher;
use vcs_types::{ObjectId, ObjectKind};

use crate::framing;

/// An object as the store sees it: kind tag + payload.
///
/// The store never interprets `data`. Its length is the value written into
/// (and checked against) the stored header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    /// The type of this object.
    pub kind: ObjectKind,
    /// The raw payload bytes.
    pub data: Vec<u8>,
}

impl Object {
    /// Create a new object from kind and data.
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Convenience constructor for blobs.
    pub fn blob(data: impl Into<Vec<u8>>) -> Self {
        Self::new(ObjectKind::Blob, data.into())
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Payload length as carried in the object header.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The canonical framed bytes (what is hashed and stored).
    pub fn framed(&self) -> Vec<u8> {
        framing::frame(self.kind, &self.data)
    }

    /// Compute the content-addressed ID for this object.
    pub fn compute_id(&self) -> ObjectId {
        ContentHasher::hash_object(self.kind, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_tracks_data() {
        let obj = Object::blob(b"12345".to_vec());
        assert_eq!(obj.size(), 5);
        assert_eq!(obj.len(), 5);
        assert!(!obj.is_empty());
    }

    #[test]
    fn size_follows_payload_edits() {
        let mut obj = Object::blob("abc");
        obj.data.extend_from_slice(b"def");
        assert_eq!(obj.size(), 6);
        assert_eq!(obj.framed(), b"blob 6\0abcdef");
    }

    #[test]
    fn compute_id_matches_digest_of_frame() {
        let obj = Object::blob("hello");
        assert_eq!(obj.framed(), b"blob 5\0hello");
        assert_eq!(obj.compute_id(), ContentHasher::digest(&obj.framed()));
    }

    #[test]
    fn same_content_same_id() {
        assert_eq!(
            Object::blob("identical").compute_id(),
            Object::blob("identical").compute_id()
        );
    }
}
