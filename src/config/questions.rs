//! Prompt sequences used by the config store.

use super::{ConfigRecord, Protocol};
use crate::error::ConfigError;
use crate::prompt::{Answers, Question};

pub const DEFAULT_HOST: &str = "example.atlassian.net";
pub const DEFAULT_USERNAME: &str = "example@domain.com";

/// First-run setup: host, username, API token, HTTPS.
pub fn creation_questions() -> Vec<Question> {
    vec![
        Question::input("host", "Provide your jira host", DEFAULT_HOST),
        Question::input("username", "Please provide your jira username", DEFAULT_USERNAME),
        Question::password("password", "Enter your jira API token"),
        Question::confirm("protocol", "Enable HTTPS Protocol?", false),
    ]
}

/// `config password`.
pub fn password_questions() -> Vec<Question> {
    vec![Question::password("password", "Type your jira password")]
}

/// `config board --set`, keyed by board name.
pub fn board_questions(board_names: Vec<String>) -> Vec<Question> {
    vec![Question::select("board", "Board", board_names)]
}

/// Build a fresh record from setup answers. String inputs are trimmed.
pub fn record_from_answers(answers: &Answers) -> Result<ConfigRecord, ConfigError> {
    let protocol = Protocol::from_https(answers.flag("protocol")?);
    Ok(ConfigRecord::new(
        protocol,
        answers.text("host")?.trim(),
        answers.text("username")?.trim(),
        answers.text("password")?.trim(),
    ))
}
