//! Content digesting for vcs.
//!
//! An object's identifier is the BLAKE3 digest of its framed bytes: the
//! `"<kind> <len>\0"` header followed by the payload. [`ContentHasher`]
//! computes that digest either over a frame already in memory or
//! incrementally, header first, as payload chunks arrive.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
