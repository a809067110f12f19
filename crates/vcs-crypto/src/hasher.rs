use vcs_types::{ObjectId, ObjectKind};

/// Incremental BLAKE3 digester for a single object.
///
/// The header is fed at construction time, so the resulting digest always
/// covers exactly the framed bytes `"<kind> <len>\0" + payload`, never the
/// payload alone. `finalize` refuses to produce an id if the number of
/// payload bytes fed differs from the length announced in the header.
pub struct ContentHasher {
    inner: blake3::Hasher,
    expected: u64,
    seen: u64,
}

impl ContentHasher {
    /// Start digesting an object of `kind` whose payload is `len` bytes.
    pub fn new(kind: ObjectKind, len: u64) -> Self {
        let mut inner = blake3::Hasher::new();
        inner.update(&kind.header(len));
        Self {
            inner,
            expected: len,
            seen: 0,
        }
    }

    /// Feed the next chunk of payload.
    pub fn update(&mut self, chunk: &[u8]) -> &mut Self {
        self.inner.update(chunk);
        self.seen += chunk.len() as u64;
        self
    }

    /// Finish and return the object id.
    pub fn finalize(&self) -> Result<ObjectId, HasherError> {
        if self.seen != self.expected {
            return Err(HasherError::LengthMismatch {
                expected: self.expected,
                actual: self.seen,
            });
        }
        Ok(self.finish())
    }

    fn finish(&self) -> ObjectId {
        ObjectId::from_hash(*self.inner.finalize().as_bytes())
    }

    /// Digest bytes that are already framed.
    pub fn digest(framed: &[u8]) -> ObjectId {
        ObjectId::from_hash(*blake3::hash(framed).as_bytes())
    }

    /// Digest an in-memory payload without building the frame.
    pub fn hash_object(kind: ObjectKind, payload: &[u8]) -> ObjectId {
        let mut hasher = Self::new(kind, payload.len() as u64);
        hasher.update(payload);
        hasher.finish()
    }

    /// Verify that framed bytes produce the expected object id.
    pub fn verify(framed: &[u8], expected: &ObjectId) -> bool {
        Self::digest(framed) == *expected
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error)]
pub enum HasherError {
    #[error("payload length mismatch: header announced {expected} bytes, read {actual}")]
    LengthMismatch { expected: u64, actual: u64 },
}
