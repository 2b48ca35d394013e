//! Interactive prompts
//!
//! Prompt sequences are plain data (`Question` lists) handed to a `Prompter`,
//! which answers the whole sequence as one async operation. The terminal
//! implementation renders them with `dialoguer`; tests plug in scripted answers.

use crate::error::ConfigError;
use async_trait::async_trait;
use std::collections::HashMap;

/// What kind of input a question asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text with an optional default.
    Input { default: Option<String> },
    /// Masked text, no default.
    Password,
    /// Yes/no.
    Confirm { default: bool },
    /// One of a list of labels; the answer is the chosen label.
    Select { choices: Vec<String> },
}

/// One prompt in a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub kind: QuestionKind,
    pub message: String,
}

impl Question {
    pub fn input(name: &str, message: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: QuestionKind::Input {
                default: Some(default.to_string()),
            },
            message: message.to_string(),
        }
    }

    pub fn password(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: QuestionKind::Password,
            message: message.to_string(),
        }
    }

    pub fn confirm(name: &str, message: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: QuestionKind::Confirm { default },
            message: message.to_string(),
        }
    }

    pub fn select(name: &str, message: &str, choices: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            kind: QuestionKind::Select { choices },
            message: message.to_string(),
        }
    }
}

/// A single answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Flag(bool),
}

/// Answers keyed by question name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(HashMap<String, Answer>);

impl Answers {
    pub fn insert(&mut self, name: impl Into<String>, answer: Answer) {
        self.0.insert(name.into(), answer);
    }

    pub fn text(&self, name: &str) -> Result<&str, ConfigError> {
        match self.0.get(name) {
            Some(Answer::Text(text)) => Ok(text.as_str()),
            _ => Err(ConfigError::Prompt(format!("missing text answer '{}'", name))),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        match self.0.get(name) {
            Some(Answer::Flag(flag)) => Ok(*flag),
            _ => Err(ConfigError::Prompt(format!("missing yes/no answer '{}'", name))),
        }
    }
}

impl FromIterator<(String, Answer)> for Answers {
    fn from_iter<I: IntoIterator<Item = (String, Answer)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Renders a question sequence and collects the answers.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, questions: &[Question]) -> Result<Answers, ConfigError>;
}

/// `dialoguer` on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn ask(&self, questions: &[Question]) -> Result<Answers, ConfigError> {
        let questions = questions.to_vec();
        tokio::task::spawn_blocking(move || ask_on_terminal(&questions))
            .await
            .map_err(|e| ConfigError::Prompt(e.to_string()))?
    }
}

fn ask_on_terminal(questions: &[Question]) -> Result<Answers, ConfigError> {
    use dialoguer::{Confirm, Input, Password, Select};

    let prompt_error = |e: dialoguer::Error| ConfigError::Prompt(e.to_string());
    let mut answers = Answers::default();

    for question in questions {
        let answer = match &question.kind {
            QuestionKind::Input { default } => {
                let mut input = Input::<String>::new().with_prompt(question.message.as_str());
                if let Some(default) = default {
                    input = input.default(default.clone());
                }
                Answer::Text(input.interact_text().map_err(prompt_error)?)
            }
            QuestionKind::Password => Answer::Text(
                Password::new()
                    .with_prompt(question.message.as_str())
                    .interact()
                    .map_err(prompt_error)?,
            ),
            QuestionKind::Confirm { default } => Answer::Flag(
                Confirm::new()
                    .with_prompt(question.message.as_str())
                    .default(*default)
                    .interact()
                    .map_err(prompt_error)?,
            ),
            QuestionKind::Select { choices } => {
                if choices.is_empty() {
                    return Err(ConfigError::Prompt(format!(
                        "no choices available for '{}'",
                        question.name
                    )));
                }
                let index = Select::new()
                    .with_prompt(question.message.as_str())
                    .items(&choices[..])
                    .default(0)
                    .interact()
                    .map_err(prompt_error)?;
                Answer::Text(choices[index].clone())
            }
        };
        answers.insert(question.name.clone(), answer);
    }

    Ok(answers)
}
