//! Failure classification for remote responses.
//!
//! Jira reports problems in several shapes: a bare 401, an `errorMessages`
//! list, an `errors` object keyed by field, or `warningMessages`. The shape is
//! decided once here so display code dispatches on the variant.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// A failed (or warning-carrying) remote response, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    #[error("Error trying to authenticate")]
    Unauthorized,

    #[error("{}", .0.join("; "))]
    ValidationErrors(Vec<String>),

    #[error("{}", join_field_errors(.0))]
    FieldErrors(BTreeMap<String, String>),

    #[error("{}", .0.join("; "))]
    Warnings(Vec<String>),

    #[error("{0}")]
    Unknown(String),
}

impl RemoteFailure {
    /// Classify a non-success response from its status code and raw body.
    ///
    /// Precedence: 401, then `errorMessages`/`errors`, then `warningMessages`,
    /// then the raw response text.
    pub fn classify(status: u16, body: &str) -> Self {
        if status == 401 {
            return RemoteFailure::Unauthorized;
        }

        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|payload| Self::from_payload(&payload))
            .unwrap_or_else(|| RemoteFailure::Unknown(describe_raw(status, body)))
    }

    /// Classify a decoded error payload. Returns `None` when it carries none of
    /// the known error or warning fields.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let object = payload.as_object()?;
        let messages = object.get("errorMessages");
        let errors = object.get("errors");

        if messages.is_some() || errors.is_some() {
            let messages = string_list(messages);
            if !messages.is_empty() {
                return Some(RemoteFailure::ValidationErrors(messages));
            }
            return Some(RemoteFailure::FieldErrors(string_map(errors)));
        }

        object
            .get("warningMessages")
            .map(|warnings| RemoteFailure::Warnings(string_list(Some(warnings))))
    }

    /// Build from a transport-level error (connect, TLS, body read).
    pub fn transport(error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("Request timeout: {}", error)
        } else if error.is_connect() {
            format!("Connection error: {}", error)
        } else {
            format!("HTTP error: {}", error)
        };
        RemoteFailure::Unknown(message)
    }
}

/// Non-empty `warningMessages` carried by an otherwise successful body.
pub fn success_warnings(payload: &Value) -> Option<Vec<String>> {
    let warnings = string_list(payload.get("warningMessages"));
    if warnings.is_empty() {
        None
    } else {
        Some(warnings)
    }
}

fn describe_raw(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        format!("Request failed with status {}: {}", status, body)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(value_text).collect())
        .unwrap_or_default()
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .map(|(field, message)| (field.clone(), value_text(message)))
                .collect()
        })
        .unwrap_or_default()
}

fn join_field_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}
