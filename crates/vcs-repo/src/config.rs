use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vcs_store::StoreConfig;

use crate::error::{RepoError, RepoResult};

/// File name of the repository configuration inside `.vcs/`.
pub const CONFIG_FILE: &str = "config.toml";

/// Repository configuration, stored as TOML in `.vcs/config.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub core: CoreConfig,
    pub store: StoreConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Branch HEAD points to in a freshly initialized repository.
    pub default_branch: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_branch: "main".into(),
        }
    }
}

impl RepoConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> RepoResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text).map_err(|e| RepoError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write to `path` as pretty TOML.
    pub fn save(&self, path: &Path) -> RepoResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| RepoError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, text)?;
        Ok(())
    }
}
