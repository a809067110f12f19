use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use vcs_crypto::ContentHasher;
use vcs_types::{ObjectId, ObjectKind};

use crate::codec;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::framing;
use crate::layout::{self, OBJECTS_DIR};
use crate::object::Object;
use crate::traits::ObjectStore;

/// Filesystem object store: one compressed block per object under
/// `<root>/objects/<2 hex>/<62 hex>`.
///
/// The store holds no state besides its root and config, so any number of
/// instances (in this or other processes) may share a root. Blocks are
/// written to a temporary file in the destination directory and renamed into
/// place, so readers see either a complete block or nothing.
#[derive(Clone, Debug)]
pub struct LooseObjectStore {
    root: PathBuf,
    config: StoreConfig,
}

impl LooseObjectStore {
    /// Open a store rooted at an existing directory.
    ///
    /// The root is not created here; repository initialization owns that.
    pub fn open(root: impl Into<PathBuf>, config: StoreConfig) -> StoreResult<Self> {
        let root = root.into();
        let meta = fs::metadata(&root)?;
        if !meta.is_dir() {
            return Err(StoreError::Io(io::Error::other(format!(
                "store root is not a directory: {}",
                root.display()
            ))));
        }
        Ok(Self { root, config })
    }

    /// The store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Absolute path of the block for `id`.
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.root.join(layout::path_for(id))
    }

    /// Re-read an object and check that it hashes to its own id.
    pub fn verify(&self, id: &ObjectId) -> StoreResult<Object> {
        let object = self.get(id)?;
        let computed = object.compute_id();
        if computed != *id {
            return Err(StoreError::HashMismatch { id: *id, computed });
        }
        Ok(object)
    }

    fn read_block(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        match fs::read(self.object_path(id)) {
            Ok(block) => Ok(block),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(*id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the block at `path` decodes to exactly `id`.
    fn existing_matches(&self, id: &ObjectId, path: &Path) -> StoreResult<bool> {
        let block = fs::read(path)?;
        let Ok(framed) = codec::decode(&block) else {
            return Ok(false);
        };
        Ok(ContentHasher::verify(&framed, id))
    }

    /// Make sure `<root>/objects/<fan-out>` exists without ever creating
    /// the root itself.
    fn ensure_fan_out_dir(&self, id: &ObjectId) -> StoreResult<PathBuf> {
        let objects = self.root.join(OBJECTS_DIR);
        create_dir_if_missing(&objects)?;
        let (dir, _) = layout::fan_out(id);
        let fan_out = objects.join(dir);
        create_dir_if_missing(&fan_out)?;
        Ok(fan_out)
    }

    fn write_block(&self, id: &ObjectId, block: &[u8]) -> StoreResult<()> {
        let dir = self.ensure_fan_out_dir(id)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(block)?;
        if self.config.fsync {
            tmp.as_file().sync_all()?;
        }
        mark_read_only(tmp.as_file())?;
        tmp.persist(self.object_path(id))
            .map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl ObjectStore for LooseObjectStore {
    fn put(&self, kind: ObjectKind, payload: &[u8]) -> StoreResult<ObjectId> {
        let framed = framing::frame(kind, payload);
        let id = ContentHasher::digest(&framed);
        let path = self.object_path(&id);

        if path.try_exists()? {
            if !self.config.verify_existing || self.existing_matches(&id, &path)? {
                debug!(id = %id.short_hex(), "object already present");
                return Ok(id);
            }
            warn!(id = %id, path = %path.display(), "existing block does not match its id; rewriting");
        }

        let block = codec::encode(&framed, self.config.compression_level)?;
        self.write_block(&id, &block)?;
        debug!(
            id = %id.short_hex(),
            kind = %kind,
            size = payload.len(),
            stored = block.len(),
            "object written"
        );
        Ok(id)
    }

    fn get(&self, id: &ObjectId) -> StoreResult<Object> {
        let block = self.read_block(id)?;
        let object = codec::open(id, &block)?;
        debug!(id = %id.short_hex(), kind = %object.kind, size = object.size(), "object read");
        Ok(object)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).try_exists()?)
    }
}

fn create_dir_if_missing(path: &Path) -> io::Result<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn mark_read_only(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o444))
}

#[cfg(not(unix))]
fn mark_read_only(_file: &File) -> io::Result<()> {
    Ok(())
}
