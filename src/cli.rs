//! CLI domain: parse, route and help only.
//! No domain logic; the route table dispatches to the session and its handlers.

mod help;
mod parse;
mod route;

pub use help::command_name;
pub use parse::{Cli, Commands, ConfigCommand};
pub use route::{CommandOutcome, CommandRouter, RELEASE_NEEDS_PROJECT, VERSION_NEEDS_PROJECT};
