//! CLI parse: clap types for the jira binary. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Jira CLI - work with issues, boards, projects, users and versions from the terminal
#[derive(Debug, Parser)]
#[command(name = "jira")]
#[command(version)]
#[command(about = "Manage Jira issues, boards, projects, users and versions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (default: ~/.jira-cli.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or change the stored configuration
    Config {
        /// Field to show or change; omit for usage
        command: Option<ConfigCommand>,
        /// New value for host, username or proxy ('remove' clears the proxy)
        value: Option<String>,
        /// Pick the default board interactively
        #[arg(short, long)]
        set: bool,
        /// Remove the default board
        #[arg(short, long)]
        remove: bool,
    },
    /// List projects
    Project {
        /// Reserved for project subcommands
        cmd: Option<String>,
    },
    /// List users
    User {
        /// Reserved for user subcommands
        cmd: Option<String>,
    },
    /// List a project's versions, or create one with --number
    Version {
        /// Project key; without it the CLI version is printed
        project: Option<String>,
        /// Name of the version to create
        #[arg(short, long)]
        number: Option<String>,
    },
    /// Show, list or change issues
    Issue {
        /// Issue key
        key: Option<String>,
        /// Issues fixed in this release (requires --project)
        #[arg(long)]
        release: Option<String>,
        /// Project key
        #[arg(short, long)]
        project: Option<String>,
        /// Open issues of this user
        #[arg(short, long)]
        user: Option<String>,
        /// Assign the issue to this user
        #[arg(short, long)]
        assign: Option<String>,
        /// Apply this transition id to the issue
        #[arg(short, long)]
        transition: Option<String>,
        /// Add this comment to the issue
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Search issues with a JQL query
    Search {
        /// JQL query
        jql: String,
    },
    /// Open an issue in the browser
    Open {
        /// Issue key
        issue: String,
    },
}

/// Fields accepted by `config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigCommand {
    Host,
    Username,
    Password,
    Board,
    Proxy,
    Remove,
}
