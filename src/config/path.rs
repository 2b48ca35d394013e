//! Config file location: `<home>/<file name>` unless an explicit path is given.

use crate::error::ConfigError;
use directories::BaseDirs;
use std::path::PathBuf;

/// Where the session looks for its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// A file name inside the current user's home directory.
    Home(String),
    /// An explicit path (`--config`).
    Path(PathBuf),
}

impl Default for ConfigLocation {
    fn default() -> Self {
        ConfigLocation::Home(super::CONFIG_FILE_NAME.to_string())
    }
}

impl ConfigLocation {
    pub fn resolve(&self) -> Result<PathBuf, ConfigError> {
        match self {
            ConfigLocation::Home(file_name) => Ok(home_dir()?.join(file_name)),
            ConfigLocation::Path(path) => Ok(path.clone()),
        }
    }
}

/// Home directory of the current user.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::HomeDirUnavailable)
}
