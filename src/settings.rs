//! Runtime settings
//!
//! Process settings that are not part of the persisted record: logging and HTTP
//! transport tuning. Built-in defaults are merged with `JIRA_CLI_*` environment
//! variables (`__` separates nesting, e.g. `JIRA_CLI_HTTP__REQUEST_TIMEOUT_SECS=30`).

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "JIRA_CLI";

/// HTTP transport tuning. Unset timeouts leave requests unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("jira-cli/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Root runtime settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub http: HttpSettings,
}

impl Settings {
    /// Defaults merged with the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(environment())
    }

    /// Defaults merged with the given environment source.
    pub fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        let settings = builder_with_defaults()?
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    let logging = LoggingConfig::default();
    Config::builder()
        .set_default("logging.enabled", logging.enabled)?
        .set_default("logging.level", logging.level)?
        .set_default("logging.format", logging.format)?
        .set_default("logging.output", logging.output)?
        .set_default("http.user_agent", default_user_agent())
}
