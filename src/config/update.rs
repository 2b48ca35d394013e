//! Field-by-field updates for the `config` command.

use super::questions;
use crate::api::Endpoint;
use crate::config::BoardId;
use crate::error::ConfigError;
use crate::session::Session;
use owo_colors::OwoColorize;
use tracing::debug;

/// Value of `config proxy <value>` that clears the proxy.
pub const PROXY_REMOVE_TOKEN: &str = "remove";

/// Record fields editable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Host,
    Username,
    Password,
    Board,
    Proxy,
}

impl ConfigField {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigField::Host => "host",
            ConfigField::Username => "username",
            ConfigField::Password => "password",
            ConfigField::Board => "board",
            ConfigField::Proxy => "proxy",
        }
    }
}

/// `--set` / `--remove` flags of the `config` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    pub set: bool,
    pub remove: bool,
}

/// Show or change one record field, persisting every mutation.
pub async fn update_config_record(
    session: &Session,
    field: ConfigField,
    value: Option<&str>,
    options: UpdateOptions,
) -> Result<(), ConfigError> {
    let record = session.config().ok_or(ConfigError::NotLoaded)?;
    debug!(field = field.name(), has_value = value.is_some(), "Updating config field");

    match field {
        ConfigField::Host => match value {
            None => show_current(session, "host", &record.host),
            Some(host) => {
                // A host the client cannot be built from would block every later run.
                if let Err(e) = Endpoint::parse(record.protocol, host) {
                    session.show_error(&e.to_string());
                    return Ok(());
                }
                session.update_config(|record| record.host = host.trim().to_string())?
            }
        },
        ConfigField::Username => match value {
            None => show_current(session, "username", &record.username),
            Some(username) => {
                session.update_config(|record| record.username = username.to_string())?
            }
        },
        ConfigField::Password => {
            let answers = session
                .prompter()
                .ask(&questions::password_questions())
                .await?;
            let password = answers.text("password")?.to_string();
            session.update_config(|record| record.password = password)?;
        }
        ConfigField::Board => update_board(session, record.default_board, options).await?,
        ConfigField::Proxy => match value {
            None => {
                let current = record.proxy.as_deref().unwrap_or("not defined");
                show_current(session, "proxy", current);
            }
            Some(PROXY_REMOVE_TOKEN) => session.update_config(|record| record.proxy = None)?,
            Some(proxy) => {
                session.update_config(|record| record.proxy = Some(proxy.to_string()))?
            }
        },
    }
    Ok(())
}

fn show_current(session: &Session, label: &str, value: &str) {
    session
        .reporter()
        .notice(format!("Current {}: {}", label, value.blue().bold()));
}

async fn update_board(
    session: &Session,
    current: Option<BoardId>,
    options: UpdateOptions,
) -> Result<(), ConfigError> {
    if options.set {
        let Some(boards) = session.boards().get_boards(session).await else {
            return Ok(());
        };
        let names = boards.iter().map(|board| board.name.clone()).collect();
        let answers = session
            .prompter()
            .ask(&questions::board_questions(names))
            .await?;
        let chosen = answers.text("board")?;
        if let Some(board) = boards.iter().find(|board| board.name == chosen) {
            let id = board.id.clone();
            session.update_config(|record| record.default_board = Some(id))?;
        }
        return Ok(());
    }

    let Some(id) = current else {
        session.show_error("There is no default board set.");
        return Ok(());
    };

    if options.remove {
        session.update_config(|record| record.default_board = None)?;
    } else if let Some(board) = session.boards().get_board(session, &id).await {
        session.reporter().notice(format!(
            "Your default board is: {}",
            board.name.green().bold()
        ));
    }
    Ok(())
}
