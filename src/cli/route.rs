//! CLI route: single route table. Each command maps to exactly one session or
//! handler call after presence checks on its arguments.

use crate::config::{update_config_record, ConfigField, ConfigStore, UpdateOptions};
use crate::error::SessionError;
use crate::session::Session;
use tracing::{debug, info_span, Instrument};

use crate::cli::command_name;
use crate::cli::parse::{Commands, ConfigCommand};

/// Usage error for `issue --release` without `--project`.
pub const RELEASE_NEEDS_PROJECT: &str =
    "You must specify a project (Use project option: -p <Project Key>)";

/// Usage error for `version --number` without a project key.
pub const VERSION_NEEDS_PROJECT: &str =
    "You must specify a project to create a version in (jira version <Project Key> -n <Name>)";

/// What the entry point should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// The command ended the session (config removed).
    Terminate,
}

/// Dispatches parsed commands against an initialized session.
pub struct CommandRouter<'a> {
    session: &'a Session,
}

impl<'a> CommandRouter<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn dispatch(&self, command: &Commands) -> Result<CommandOutcome, SessionError> {
        let span = info_span!("command", name = %command_name(command));
        self.route(command).instrument(span).await
    }

    async fn route(&self, command: &Commands) -> Result<CommandOutcome, SessionError> {
        let session = self.session;
        debug!("Routing command");

        match command {
            Commands::Config {
                command,
                value,
                set,
                remove,
            } => {
                let field = match command {
                    None => {
                        ConfigStore::docs(session.reporter());
                        return Ok(CommandOutcome::Continue);
                    }
                    Some(ConfigCommand::Remove) => {
                        session.remove_config()?;
                        return Ok(CommandOutcome::Terminate);
                    }
                    Some(ConfigCommand::Host) => ConfigField::Host,
                    Some(ConfigCommand::Username) => ConfigField::Username,
                    Some(ConfigCommand::Password) => ConfigField::Password,
                    Some(ConfigCommand::Board) => ConfigField::Board,
                    Some(ConfigCommand::Proxy) => ConfigField::Proxy,
                };
                let options = UpdateOptions {
                    set: *set,
                    remove: *remove,
                };
                update_config_record(session, field, value.as_deref(), options).await?;
            }
            // Subcommands are reserved; an argument is accepted and ignored.
            Commands::Project { cmd } => {
                if cmd.is_none() {
                    session.projects().list(session).await;
                }
            }
            Commands::User { cmd } => {
                if cmd.is_none() {
                    session.users().list_users(session).await;
                }
            }
            Commands::Version { project, number } => match (project, number) {
                (Some(project), Some(name)) => {
                    session
                        .versions()
                        .create_version(session, project, name)
                        .await;
                }
                (Some(project), None) => {
                    session.versions().list_versions(session, project).await;
                }
                (None, Some(_)) => session.show_error(VERSION_NEEDS_PROJECT),
                (None, None) => session.reporter().print(env!("CARGO_PKG_VERSION")),
            },
            Commands::Issue {
                key,
                release,
                project,
                user,
                assign,
                transition,
                comment,
            } => {
                let issues = session.issues();
                match key {
                    None => {
                        if let Some(release) = release {
                            match project {
                                Some(project) => {
                                    issues.release_issues(session, project, release).await;
                                }
                                None => session.show_error(RELEASE_NEEDS_PROJECT),
                            }
                        } else if let Some(user) = user {
                            issues.summary(session, Some(user)).await;
                        } else if let Some(project) = project {
                            issues.project_issues(session, project).await;
                        } else {
                            issues.summary(session, None).await;
                        }
                    }
                    Some(key) => {
                        if let Some(assignee) = assign {
                            issues.assign_issue(session, key, assignee).await;
                        } else if let Some(transition) = transition {
                            issues.make_transition(session, key, transition).await;
                        } else if let Some(comment) = comment {
                            issues.add_comment(session, key, comment).await;
                        } else {
                            issues.find_issue(session, key).await;
                        }
                    }
                }
            }
            Commands::Search { jql } => {
                session.issues().search(session, jql).await;
            }
            Commands::Open { issue } => {
                session.issues().open_issue(session, issue).await;
            }
        }

        Ok(CommandOutcome::Continue)
    }
}
