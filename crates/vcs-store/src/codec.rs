//! Compression boundary: zstd frames with the content checksum enabled.

use std::io::{self, Write};

use vcs_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::framing;
use crate::object::Object;

/// Default zstd level for new blocks.
pub const DEFAULT_LEVEL: i32 = 3;

/// Compress `data` into a single zstd frame.
///
/// Output may differ across levels and library versions; only
/// `decode(encode(x)) == x` is guaranteed.
pub fn encode(data: &[u8], level: i32) -> io::Result<Vec<u8>> {
    let mut encoder = zstd::stream::Encoder::new(Vec::with_capacity(data.len() / 2 + 16), level)?;
    encoder.include_checksum(true)?;
    encoder.write_all(data)?;
    encoder.finish()
}

/// Decompress a block produced by [`encode`].
///
/// Fails on bad magic, truncated frames and checksum mismatches.
pub fn decode(block: &[u8]) -> io::Result<Vec<u8>> {
    zstd::decode_all(block)
}

/// Decompress and unframe a stored block that was filed under `id`.
pub fn open(id: &ObjectId, block: &[u8]) -> StoreResult<Object> {
    let framed = decode(block).map_err(|e| StoreError::CorruptObject {
        id: *id,
        reason: e.to_string(),
    })?;
    framing::unframe(framed).map_err(|source| StoreError::MalformedObject { id: *id, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_empty() {
        let block = encode(b"", DEFAULT_LEVEL).unwrap();
        assert!(!block.is_empty());
        assert_eq!(decode(&block).unwrap(), b"");
    }

    #[test]
    fn compresses_repetitive_data() {
        let data = vec![b'a'; 64 * 1024];
        let block = encode(&data, DEFAULT_LEVEL).unwrap();
        assert!(block.len() < data.len() / 10);
        assert_eq!(decode(&block).unwrap(), data);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode(b"definitely not zstd").is_err());
    }

    #[test]
    fn truncated_block_is_rejected() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();
        let block = encode(&data, DEFAULT_LEVEL).unwrap();
        assert!(decode(&block[..block.len() - 4]).is_err());
    }

    #[test]
    fn checksum_catches_bit_flip() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 253) as u8).collect();
        let mut block = encode(&data, DEFAULT_LEVEL).unwrap();
        // Last four bytes are the content checksum.
        let last = block.len() - 1;
        block[last] ^= 0xFF;
        assert!(decode(&block).is_err());
    }

    #[test]
    fn open_recovers_object() {
        let obj = Object::blob("sealed");
        let block = encode(&obj.framed(), DEFAULT_LEVEL).unwrap();
        assert_eq!(open(&obj.compute_id(), &block).unwrap(), obj);
    }

    #[test]
    fn open_reports_corrupt_before_malformed() {
        let id = Object::blob("x").compute_id();
        let err = open(&id, b"garbage").unwrap_err();
        assert!(matches!(err, StoreError::CorruptObject { .. }));
    }

    #[test]
    fn open_reports_malformed_header() {
        let id = Object::blob("hello").compute_id();
        let block = encode(b"blob 10\0hello", DEFAULT_LEVEL).unwrap();
        let err = open(&id, &block).unwrap_err();
        assert!(matches!(err, StoreError::MalformedObject { .. }));
    }
}
