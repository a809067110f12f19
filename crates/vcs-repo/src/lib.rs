//! Repository scaffolding for vcs.
//!
//! A repository is a work tree containing a `.vcs/` directory:
//!
//! ```text
//! .vcs/
//!   HEAD            ref: refs/heads/main
//!   config.toml     [core] / [store] settings
//!   objects/        loose objects, fanned out by the first two hex chars
//!   objects/pack/
//!   objects/info/
//!   refs/heads/
//!   refs/tags/
//! ```
//!
//! [`Repository`] creates and locates that layout and hands out a
//! [`LooseObjectStore`](vcs_store::LooseObjectStore) rooted at `.vcs/`.

pub mod config;
pub mod error;
pub mod head;
pub mod names;
pub mod repository;

pub use config::{CoreConfig, RepoConfig};
pub use error::{RepoError, RepoResult};
pub use head::Head;
pub use repository::{InitOutcome, Repository, VCS_DIR};
