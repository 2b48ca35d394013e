//! CLI command-name contract for logging.

use crate::cli::parse::{Commands, ConfigCommand};

/// Command name string for tracing spans (e.g. "config.board", "issue.assign").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Config { command, .. } => match command {
            Some(field) => format!("config.{}", config_command_name(*field)),
            None => "config".to_string(),
        },
        Commands::Project { .. } => "project".to_string(),
        Commands::User { .. } => "user".to_string(),
        Commands::Version { number, .. } => {
            if number.is_some() {
                "version.create".to_string()
            } else {
                "version".to_string()
            }
        }
        Commands::Issue { .. } => format!("issue.{}", issue_command_name(command)),
        Commands::Search { .. } => "search".to_string(),
        Commands::Open { .. } => "open".to_string(),
    }
}

pub fn config_command_name(command: ConfigCommand) -> &'static str {
    match command {
        ConfigCommand::Host => "host",
        ConfigCommand::Username => "username",
        ConfigCommand::Password => "password",
        ConfigCommand::Board => "board",
        ConfigCommand::Proxy => "proxy",
        ConfigCommand::Remove => "remove",
    }
}

fn issue_command_name(command: &Commands) -> &'static str {
    let Commands::Issue {
        key,
        release,
        project,
        user,
        assign,
        transition,
        comment,
    } = command
    else {
        return "";
    };

    match key {
        None if release.is_some() => "release",
        None if user.is_some() => "user",
        None if project.is_some() => "project",
        None => "summary",
        Some(_) if assign.is_some() => "assign",
        Some(_) if transition.is_some() => "transition",
        Some(_) if comment.is_some() => "comment",
        Some(_) => "find",
    }
}
