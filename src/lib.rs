//! Jira CLI: manage issues, boards, projects, users and versions from a terminal.
//!
//! The [`session::Session`] owns the persisted configuration record and the single
//! authenticated REST client for the process. Command handlers reach the remote
//! tracker through its `api_request`/`agile_request` primitives and report failures
//! through its [`report::Reporter`].

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod session;
pub mod settings;
pub mod views;
