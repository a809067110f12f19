//! Foundation types for vcs.
//!
//! Every other vcs crate depends on `vcs-types` for the two values that name
//! an object: what it is ([`ObjectKind`]) and where it lives ([`ObjectId`]).
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Content-addressed identifier (BLAKE3 digest of the framed object)
//! - [`ObjectKind`] -- Type tag carried in every object header

pub mod error;
pub mod kind;
pub mod object;

pub use error::TypeError;
pub use kind::ObjectKind;
pub use object::ObjectId;
