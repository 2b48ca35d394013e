//! Domain Handlers
//!
//! One capability trait per tracker entity. Handlers are stateless, receive the
//! session at call time and talk to the tracker only through
//! `Session::api_request` / `Session::agile_request`. A failed request is
//! reported through the session and surfaces as `None`; nothing here returns an
//! error to the router.

use crate::config::BoardId;
use crate::error::{ApiError, RemoteFailure};
use crate::session::Session;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub mod boards;
pub mod issues;
pub mod projects;
pub mod users;
pub mod versions;

pub use boards::Boards;
pub use issues::Issues;
pub use projects::Projects;
pub use users::Users;
pub use versions::Versions;

/// A board as listed by the agile API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
}

#[async_trait]
pub trait BoardHandler: Send + Sync {
    /// Every board visible to the user.
    async fn get_boards(&self, session: &Session) -> Option<Vec<Board>>;

    /// A single board by id.
    async fn get_board(&self, session: &Session, id: &BoardId) -> Option<Board>;
}

#[async_trait]
pub trait IssueHandler: Send + Sync {
    /// Open issues assigned to `user`, or to the current user when `None`.
    async fn summary(&self, session: &Session, user: Option<&str>) -> Option<usize>;

    async fn project_issues(&self, session: &Session, project: &str) -> Option<usize>;

    async fn release_issues(&self, session: &Session, project: &str, release: &str)
        -> Option<usize>;

    /// Run a raw JQL query.
    async fn search(&self, session: &Session, jql: &str) -> Option<usize>;

    async fn find_issue(&self, session: &Session, key: &str) -> Option<Value>;

    async fn assign_issue(&self, session: &Session, key: &str, user: &str) -> Option<()>;

    async fn make_transition(&self, session: &Session, key: &str, transition: &str)
        -> Option<()>;

    async fn add_comment(&self, session: &Session, key: &str, comment: &str) -> Option<()>;

    /// Open the issue page in the system browser.
    async fn open_issue(&self, session: &Session, key: &str) -> Option<()>;
}

#[async_trait]
pub trait ProjectHandler: Send + Sync {
    async fn list(&self, session: &Session) -> Option<usize>;
}

#[async_trait]
pub trait UserHandler: Send + Sync {
    async fn list_users(&self, session: &Session) -> Option<usize>;
}

#[async_trait]
pub trait VersionHandler: Send + Sync {
    async fn list_versions(&self, session: &Session, project: &str) -> Option<usize>;

    async fn create_version(&self, session: &Session, project: &str, name: &str) -> Option<()>;
}

/// Unwrap a request result, reporting the failure.
pub(crate) fn reported<T>(session: &Session, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(error = %error, "Request failed");
            session.show_errors(&error);
            None
        }
    }
}

/// Decode a response body, reporting a shape mismatch as an unknown failure.
pub(crate) fn decoded<T: DeserializeOwned>(session: &Session, payload: Value) -> Option<T> {
    let result = serde_json::from_value(payload).map_err(|e| {
        ApiError::Remote(RemoteFailure::Unknown(format!(
            "Unexpected response from Jira: {}",
            e
        )))
    });
    reported(session, result)
}
