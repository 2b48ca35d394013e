//! Configuration Record and Store
//!
//! The persisted record holds connection credentials and user defaults. It is a
//! single JSON object at `<home>/.jira-cli.json`, created once through an
//! interactive prompt sequence, loaded on later runs, mutated field by field and
//! always rewritten as a whole file.

use crate::error::ConfigError;
use crate::prompt::Prompter;
use crate::report::Reporter;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

mod path;
pub mod questions;
pub mod update;

pub use path::{home_dir, ConfigLocation};
pub use update::{update_config_record, ConfigField, UpdateOptions, PROXY_REMOVE_TOKEN};

/// File name of the record inside the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".jira-cli.json";

/// The only classic API version this client speaks.
pub const API_VERSION: &str = "2";

/// Transport protocol of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn from_https(enabled: bool) -> Self {
        if enabled {
            Protocol::Https
        } else {
            Protocol::Http
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board identifier as stored in the record. Jira hands out numeric ids; a
/// hand-edited file may hold a string, which is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardId {
    Numeric(u64),
    Text(String),
}

impl From<u64> for BoardId {
    fn from(id: u64) -> Self {
        BoardId::Numeric(id)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardId::Numeric(id) => write!(f, "{}", id),
            BoardId::Text(id) => f.write_str(id),
        }
    }
}

/// The persisted configuration record.
///
/// `host`, `username` and `password` are always present once the file exists;
/// optional fields are omitted from the file rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    pub protocol: Protocol,
    pub host: String,
    pub username: String,
    /// Stored in clear text.
    pub password: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(rename = "strictSSL", default = "default_strict_ssl")]
    pub strict_ssl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_board: Option<BoardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_strict_ssl() -> bool {
    true
}

impl ConfigRecord {
    /// A fresh record: API version fixed to "2", strict SSL on, no defaults.
    pub fn new(
        protocol: Protocol,
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            protocol,
            host: host.into(),
            username: username.into(),
            password: password.into(),
            api_version: default_api_version(),
            strict_ssl: true,
            default_board: None,
            proxy: None,
        }
    }
}

/// Result of opening the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOpened {
    /// The file was absent and has just been created interactively.
    Created,
    /// An existing file was loaded.
    Loaded,
}

/// Owns the record and the file it lives in.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    record: ConfigRecord,
}

impl ConfigStore {
    /// Load the record at `path`, or run the creation dialog when the file is absent.
    pub async fn init(
        path: PathBuf,
        prompter: &dyn Prompter,
        reporter: &Reporter,
    ) -> Result<(Self, StoreOpened), ConfigError> {
        if !path.exists() {
            info!(config_path = %path.display(), "Config file not found; starting setup");
            let record = Self::create_config_file(&path, prompter, reporter).await?;
            return Ok((Self { path, record }, StoreOpened::Created));
        }

        let record = Self::load_config_file(&path)?;
        debug!(config_path = %path.display(), host = %record.host, "Config file loaded");
        Ok((Self { path, record }, StoreOpened::Loaded))
    }

    /// Wrap an in-memory record without touching disk.
    pub fn from_parts(path: PathBuf, record: ConfigRecord) -> Self {
        Self { path, record }
    }

    /// Read and parse the record. Unparsable contents fail with `ConfigError::Corrupt`.
    pub fn load_config_file(path: &Path) -> Result<ConfigRecord, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Prompt for host, username, token and HTTPS, then persist the new record.
    pub async fn create_config_file(
        path: &Path,
        prompter: &dyn Prompter,
        reporter: &Reporter,
    ) -> Result<ConfigRecord, ConfigError> {
        let answers = prompter.ask(&questions::creation_questions()).await?;
        let record = questions::record_from_answers(&answers)?;

        write_record(path, &record)?;
        info!(config_path = %path.display(), "Config file created");
        reporter.notice(format!(
            "Config file successfully created in: {}",
            path.display().green()
        ));
        Ok(record)
    }

    /// Delete the file. A missing file is an error; nothing here catches it.
    pub fn remove_config_file(&self, reporter: &Reporter) -> Result<(), ConfigError> {
        std::fs::remove_file(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(config_path = %self.path.display(), "Config file removed");
        reporter.notice("Config file successfully deleted!".red());
        Ok(())
    }

    /// Rewrite the whole record.
    pub fn save(&self) -> Result<(), ConfigError> {
        write_record(&self.path, &self.record)
    }

    /// Rewrite the whole record; a failure is reported and swallowed.
    pub fn update_config_file(&self, reporter: &Reporter) {
        match self.save() {
            Ok(()) => {
                debug!(config_path = %self.path.display(), "Config file updated");
                reporter.notice("Config file successfully updated.".green());
            }
            Err(e) => {
                warn!(config_path = %self.path.display(), error = %e, "Config file update failed");
                reporter.show_error("Error updating config file.");
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut ConfigRecord {
        &mut self.record
    }

    /// Static usage text for the `config` command.
    pub fn docs(reporter: &Reporter) {
        reporter.print(
            "\n  Usage:  config <command> [value] [--set] [--remove]\n\n\n  Commands:\n\n    \
             host       Show or set the Jira host\n    \
             username   Show or set the username\n    \
             password   Prompt for a new API token\n    \
             board      Show, --set or --remove the default board\n    \
             proxy      Show or set the proxy ('remove' clears it)\n    \
             remove     Remove the config file\n",
        );
    }
}

fn write_record(path: &Path, record: &ConfigRecord) -> Result<(), ConfigError> {
    let contents = serde_json::to_string(record).map_err(ConfigError::Serialize)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
