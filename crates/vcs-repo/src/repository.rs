use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vcs_store::LooseObjectStore;

use crate::config::{RepoConfig, CONFIG_FILE};
use crate::error::{RepoError, RepoResult};
use crate::head::Head;
use crate::names::validate_branch_name;

/// Name of the repository metadata directory inside the work tree.
pub const VCS_DIR: &str = ".vcs";

/// File (inside [`VCS_DIR`]) holding the HEAD reference.
pub const HEAD_FILE: &str = "HEAD";

/// Directories created under [`VCS_DIR`] by `init`.
const SCAFFOLD_DIRS: &[&str] = &[
    "objects",
    "objects/pack",
    "objects/info",
    "refs",
    "refs/heads",
    "refs/tags",
];

/// A vcs repository on disk: a work tree with a `.vcs/` directory.
#[derive(Clone, Debug)]
pub struct Repository {
    work_dir: PathBuf,
    vcs_dir: PathBuf,
    config: RepoConfig,
}

/// What `init` did.
#[derive(Debug)]
pub struct InitOutcome {
    pub repo: Repository,
    /// `true` when `.vcs/` already existed; nothing was overwritten.
    pub reinitialized: bool,
}

impl Repository {
    /// Create the `.vcs/` scaffolding under `work_dir`.
    ///
    /// Safe to run again: missing pieces are filled in, while an existing
    /// HEAD or config file is left untouched.
    pub fn init(work_dir: impl AsRef<Path>, initial_branch: Option<&str>) -> RepoResult<InitOutcome> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let vcs_dir = work_dir.join(VCS_DIR);
        let reinitialized = vcs_dir.is_dir();

        let mut config = RepoConfig::load(&vcs_dir.join(CONFIG_FILE))?;
        if let Some(branch) = initial_branch {
            validate_branch_name(branch)?;
            if !reinitialized {
                config.core.default_branch = branch.to_string();
            }
        }
        validate_branch_name(&config.core.default_branch)?;

        fs::create_dir_all(&vcs_dir)?;
        for dir in SCAFFOLD_DIRS {
            fs::create_dir_all(vcs_dir.join(dir))?;
        }

        let head_path = vcs_dir.join(HEAD_FILE);
        if !head_path.exists() {
            let head = Head::Symbolic(config.core.default_branch.clone());
            fs::write(&head_path, head.to_string())?;
        }
        let config_path = vcs_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            config.save(&config_path)?;
        }

        info!(path = %vcs_dir.display(), reinitialized, "initialized repository");
        Ok(InitOutcome {
            repo: Self {
                work_dir,
                vcs_dir,
                config,
            },
            reinitialized,
        })
    }

    /// Open the repository whose work tree is exactly `work_dir`.
    pub fn open(work_dir: impl AsRef<Path>) -> RepoResult<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let vcs_dir = work_dir.join(VCS_DIR);
        if !vcs_dir.is_dir() {
            return Err(RepoError::NotARepository(work_dir));
        }
        let config = RepoConfig::load(&vcs_dir.join(CONFIG_FILE))?;
        debug!(path = %vcs_dir.display(), "opened repository");
        Ok(Self {
            work_dir,
            vcs_dir,
            config,
        })
    }

    /// Find the repository containing `start`, walking up parent directories.
    pub fn discover(start: impl AsRef<Path>) -> RepoResult<Self> {
        let start = start.as_ref();
        start
            .ancestors()
            .find(|dir| dir.join(VCS_DIR).is_dir())
            .map(Self::open)
            .unwrap_or_else(|| Err(RepoError::NotARepository(start.to_path_buf())))
    }

    /// The work tree root.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The `.vcs/` directory; also the object store root.
    pub fn vcs_dir(&self) -> &Path {
        &self.vcs_dir
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Read and parse HEAD.
    pub fn head(&self) -> RepoResult<Head> {
        let contents = fs::read_to_string(self.vcs_dir.join(HEAD_FILE))?;
        Head::parse(&contents)
    }

    /// The loose object store of this repository.
    pub fn store(&self) -> RepoResult<LooseObjectStore> {
        Ok(LooseObjectStore::open(
            &self.vcs_dir,
            self.config.store.clone(),
        )?)
    }
}
