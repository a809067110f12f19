use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;
use vcs_crypto::ContentHasher;
use vcs_types::{ObjectId, ObjectKind};

use crate::codec;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::framing;
use crate::object::Object;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. Objects go through the same framing and
/// compression as on disk, so blocks held here are byte-compatible with
/// [`LooseObjectStore`](crate::LooseObjectStore) blocks.
pub struct InMemoryObjectStore {
    blocks: RwLock<HashMap<ObjectId, Vec<u8>>>,
    config: StoreConfig,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with an explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.blocks.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.read().expect("lock poisoned").is_empty()
    }

    /// Total compressed bytes across all stored blocks.
    pub fn stored_bytes(&self) -> u64 {
        self.blocks
            .read()
            .expect("lock poisoned")
            .values()
            .map(|block| block.len() as u64)
            .sum()
    }

    /// Return a sorted list of all object IDs in the store.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.blocks.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put(&self, kind: ObjectKind, payload: &[u8]) -> StoreResult<ObjectId> {
        let framed = framing::frame(kind, payload);
        let id = ContentHasher::digest(&framed);
        if self.blocks.read().expect("lock poisoned").contains_key(&id) {
            return Ok(id);
        }
        let block = codec::encode(&framed, self.config.compression_level)?;
        let mut map = self.blocks.write().expect("lock poisoned");
        // A racing writer may have inserted the same block meanwhile.
        map.entry(id).or_insert(block);
        debug!(id = %id.short_hex(), size = payload.len(), "object written (memory)");
        Ok(id)
    }

    fn get(&self, id: &ObjectId) -> StoreResult<Object> {
        let map = self.blocks.read().expect("lock poisoned");
        let block = map.get(id).ok_or(StoreError::NotFound(*id))?;
        codec::open(id, block)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.blocks.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcs_types::TypeError;

    #[test]
    fn put_and_get_blob() {
        let store = InMemoryObjectStore::new();
        let id = store.put(ObjectKind::Blob, b"hello world").unwrap();
        let obj = store.get(&id).unwrap();
        assert_eq!(obj, Object::blob("hello world"));
    }

    #[test]
    fn same_content_produces_same_id() {
        let store = InMemoryObjectStore::new();
        let id1 = store.put(ObjectKind::Blob, b"identical content").unwrap();
        let id2 = store.put(ObjectKind::Blob, b"identical content").unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn different_content_produces_different_ids() {
        let store = InMemoryObjectStore::new();
        let id1 = store.put(ObjectKind::Blob, b"aaa").unwrap();
        let id2 = store.put(ObjectKind::Blob, b"aab").unwrap();
        assert_ne!(id1, id2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn ids_match_disk_format() {
        let store = InMemoryObjectStore::new();
        let id = store.put(ObjectKind::Blob, b"hello").unwrap();
        assert_eq!(id, ContentHasher::digest(b"blob 5\0hello"));
    }

    #[test]
    fn missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = ContentHasher::digest(b"missing");
        assert!(matches!(store.get(&id), Err(StoreError::NotFound(_))));
        assert!(!store.exists(&id).unwrap());
    }

    #[test]
    fn get_hex_rejects_malformed_id() {
        let store = InMemoryObjectStore::new();
        assert!(matches!(
            store.get_hex("zz"),
            Err(StoreError::InvalidObjectId(_))
        ));
    }

    #[test]
    fn invalid_id_error_keeps_parse_cause() {
        use std::error::Error;

        let store = InMemoryObjectStore::new();
        let err = store.get_hex(&"g".repeat(ObjectId::HEX_LEN)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidObjectId(TypeError::InvalidHex(_))));
        assert!(err.source().is_some());
    }

    #[test]
    fn get_hex_finds_object() {
        let store = InMemoryObjectStore::new();
        let id = store.put(ObjectKind::Blob, b"by hex").unwrap();
        assert_eq!(store.get_hex(&id.to_hex()).unwrap().data, b"by hex");
    }

    #[test]
    fn corrupted_block_is_detected() {
        let store = InMemoryObjectStore::new();
        let id = store.put(ObjectKind::Blob, b"victim").unwrap();
        store
            .blocks
            .write()
            .unwrap()
            .insert(id, b"not zstd".to_vec());
        assert!(matches!(store.get(&id), Err(StoreError::CorruptObject { .. })));
    }

    #[test]
    fn all_ids_is_sorted() {
        let store = InMemoryObjectStore::new();
        for data in [&b"aaa"[..], b"bbb", b"ccc"] {
            store.put(ObjectKind::Blob, data).unwrap();
        }
        let ids = store.all_ids();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn stored_bytes_counts_compressed_blocks() {
        let store = InMemoryObjectStore::new();
        assert_eq!(store.stored_bytes(), 0);
        store.put(ObjectKind::Blob, &vec![0u8; 100_000]).unwrap();
        let stored = store.stored_bytes();
        assert!(stored > 0 && stored < 100_000);
    }

    #[test]
    fn concurrent_puts_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put(ObjectKind::Blob, b"shared data").unwrap())
            })
            .collect();
        let ids: Vec<ObjectId> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryObjectStore::new();
        store.put(ObjectKind::Blob, b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("object_count"));
    }
}
