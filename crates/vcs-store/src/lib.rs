//! Content-addressed object storage for vcs.
//!
//! This crate implements a hash-keyed object store analogous to git's
//! `.git/objects/` directory. An object is framed as `"<kind> <len>\0"`
//! followed by its payload; the BLAKE3 digest of those framed bytes is the
//! object's [`ObjectId`](vcs_types::ObjectId), and the zstd-compressed frame
//! is what lands on disk at `objects/<2 hex>/<rest>`.
//!
//! # Pieces
//!
//! - [`framing`] -- `frame` / `unframe`, with header length checking
//! - [`codec`] -- zstd encode/decode with frame checksums
//! - [`layout`] -- identifier to relative path mapping
//! - [`LooseObjectStore`] -- the on-disk store, atomic temp-file-then-rename writes
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! All backends implement the [`ObjectStore`] trait.
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. There is no update and no delete.
//! 3. Concurrent writers of the same object are harmless: same path, same bytes.
//! 4. The store never interprets object contents.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod codec;
pub mod config;
pub mod error;
pub mod framing;
pub mod layout;
pub mod loose;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use framing::FrameError;
pub use loose::LooseObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::Object;
pub use traits::ObjectStore;
