//! Logging System
//!
//! Structured diagnostics through `tracing`. Command output goes to stdout via the
//! session reporter, so logs default to stderr at `warn` and never mix with it.

use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install a subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file"
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Default log file: `<data dir>/jira-cli/jira-cli.log`.
pub fn default_log_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "jira-cli").map(|dirs| dirs.data_dir().join("jira-cli.log"))
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (JIRA_CLI_LOG, JIRA_CLI_LOG_FORMAT, JIRA_CLI_LOG_OUTPUT)
/// 2. The given config (CLI flags already merged in by the caller)
/// 3. Defaults
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let (writer, ansi) = match output {
        OutputDestination::Stderr => (BoxMakeWriter::new(std::io::stderr), config.color),
        OutputDestination::Stdout => (BoxMakeWriter::new(std::io::stdout), config.color),
        OutputDestination::File => (BoxMakeWriter::new(Mutex::new(open_log_file(config)?)), false),
    };

    let registry = Registry::default().with(filter);
    let installed = if format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()
    };

    installed.map_err(|e| ConfigError::Logging(e.to_string()))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, ConfigError> {
    let log_file = config
        .file
        .clone()
        .or_else(default_log_file)
        .ok_or_else(|| ConfigError::Logging("No log file path available".to_string()))?;

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Logging(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            ConfigError::Logging(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("JIRA_CLI_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ConfigError::Logging(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: &LoggingConfig) -> Result<String, ConfigError> {
    if let Ok(format) = std::env::var("JIRA_CLI_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(ConfigError::Logging(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputDestination {
    Stderr,
    Stdout,
    File,
}

/// Determine output destination from config or environment
fn determine_output(config: &LoggingConfig) -> Result<OutputDestination, ConfigError> {
    if let Ok(output) = std::env::var("JIRA_CLI_LOG_OUTPUT") {
        return parse_output_destination(&output);
    }
    parse_output_destination(&config.output)
}

fn parse_output_destination(output: &str) -> Result<OutputDestination, ConfigError> {
    match output {
        "stderr" => Ok(OutputDestination::Stderr),
        "stdout" => Ok(OutputDestination::Stdout),
        "file" => Ok(OutputDestination::File),
        _ => Err(ConfigError::Logging(format!(
            "Invalid log output: {} (must be 'stderr', 'stdout' or 'file')",
            output
        ))),
    }
}
