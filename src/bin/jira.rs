//! Jira CLI Binary
//!
//! Command-line entry point. The only place that decides the process exit status.

use clap::{CommandFactory, Parser};
use jira_cli::cli::{Cli, CommandOutcome, CommandRouter};
use jira_cli::config::ConfigLocation;
use jira_cli::logging::{init_logging, LoggingConfig};
use jira_cli::session::{InitOutcome, Session};
use jira_cli::settings::Settings;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &settings);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Jira CLI starting");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    process::exit(runtime.block_on(run(cli, settings)));
}

async fn run(cli: Cli, settings: Settings) -> i32 {
    let Some(command) = cli.command.as_ref() else {
        let _ = Cli::command().print_help();
        return 0;
    };

    let location = cli
        .config
        .clone()
        .map(ConfigLocation::Path)
        .unwrap_or_default();
    let session = Session::get_or_create_with(|| {
        Session::builder()
            .config_location(location)
            .settings(settings)
            .build()
    });

    match session.init().await {
        Ok(InitOutcome::Created(path)) => {
            info!(config_path = %path.display(), "Config created; exiting");
            return 0;
        }
        Ok(InitOutcome::Ready) => {}
        Err(e) => {
            error!("Error initializing session: {}", e);
            session.show_error(&e.to_string());
            return 1;
        }
    }

    match CommandRouter::new(&session).dispatch(command).await {
        Ok(CommandOutcome::Terminate) => {
            info!("Session terminated by command");
            0
        }
        Ok(CommandOutcome::Continue) => {
            info!("Command completed successfully");
            0
        }
        Err(e) => {
            error!("Command failed: {}", e);
            session.show_error(&e.to_string());
            1
        }
    }
}

/// Build logging configuration from CLI args over runtime settings.
/// Precedence: CLI flags override environment override defaults.
fn build_logging_config(cli: &Cli, settings: &Settings) -> LoggingConfig {
    let mut config = settings.logging.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
