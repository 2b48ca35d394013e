//! Client Session
//!
//! The process-wide session owns the configuration store, the single
//! authenticated REST client and the reporter, and holds the domain handlers.
//! `init()` is the only transition into a usable state and must complete before
//! any command runs:
//!
//! `Unconfigured -> Configured (just created; the caller exits) | Configured -> ClientReady`

use crate::api::failure::success_warnings;
use crate::api::{ClientFactory, JiraClient, RequestOptions};
use crate::config::{ConfigLocation, ConfigRecord, ConfigStore, StoreOpened};
use crate::error::{ApiError, ConfigError, SessionError};
use crate::handlers::{
    BoardHandler, Boards, IssueHandler, Issues, ProjectHandler, Projects, UserHandler, Users,
    VersionHandler, Versions,
};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::report::Reporter;
use crate::settings::Settings;
use crate::views::TableStyle;
use parking_lot::RwLock;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

static SESSION: OnceLock<Arc<Session>> = OnceLock::new();

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No record loaded.
    Unconfigured,
    /// Record loaded or just created, no client yet.
    Configured,
    /// Client constructed; commands may run.
    ClientReady,
}

/// Result of `Session::init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The record did not exist and was created at this path. The run should end here.
    Created(PathBuf),
    /// Record loaded and client constructed.
    Ready,
}

pub struct Session {
    location: ConfigLocation,
    settings: Settings,
    store: RwLock<Option<ConfigStore>>,
    client: OnceLock<JiraClient>,
    prompter: Arc<dyn Prompter>,
    reporter: Reporter,
    table_style: TableStyle,
    boards: Arc<dyn BoardHandler>,
    issues: Arc<dyn IssueHandler>,
    projects: Arc<dyn ProjectHandler>,
    users: Arc<dyn UserHandler>,
    versions: Arc<dyn VersionHandler>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("location", &self.location)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// The process session, created with defaults on first access.
    pub fn get_or_create() -> Arc<Session> {
        Self::get_or_create_with(|| Session::builder().build())
    }

    /// The process session, created by `create` on first access. Later calls
    /// return the same instance and never run `create`.
    pub fn get_or_create_with(create: impl FnOnce() -> Session) -> Arc<Session> {
        Arc::clone(SESSION.get_or_init(|| Arc::new(create())))
    }

    /// Load (or interactively create) the record, then construct the client.
    ///
    /// Calling it again once the client exists is a no-op.
    pub async fn init(&self) -> Result<InitOutcome, SessionError> {
        if self.client.get().is_some() {
            return Ok(InitOutcome::Ready);
        }

        let record = match self.config() {
            Some(record) => record,
            None => {
                let path = self.location.resolve()?;
                let (store, opened) =
                    ConfigStore::init(path.clone(), self.prompter.as_ref(), &self.reporter)
                        .await?;
                let record = store.record().clone();
                *self.store.write() = Some(store);
                if opened == StoreOpened::Created {
                    return Ok(InitOutcome::Created(path));
                }
                record
            }
        };

        let client = ClientFactory::build(&record, &self.settings.http)?;
        // A concurrent init may have won; its client is equivalent.
        let _ = self.client.set(client);
        info!("Session ready");
        Ok(InitOutcome::Ready)
    }

    pub fn state(&self) -> SessionState {
        if self.client.get().is_some() {
            SessionState::ClientReady
        } else if self.store.read().is_some() {
            SessionState::Configured
        } else {
            SessionState::Unconfigured
        }
    }

    /// The constructed client. Never triggers construction.
    pub fn client(&self) -> Result<&JiraClient, ApiError> {
        self.client.get().ok_or(ApiError::NotInitialized)
    }

    /// Request against the classic surface (`/rest/api/{version}{path}`).
    pub async fn api_request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let client = self.client()?;
        let uri = client.classic_uri(path, options.query.as_deref());
        self.dispatch(client, uri, options).await
    }

    /// Request against the agile surface (`/rest/agile/1.0{path}`).
    pub async fn agile_request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let client = self.client()?;
        let uri = client.agile_uri(path, options.query.as_deref());
        self.dispatch(client, uri, options).await
    }

    async fn dispatch(
        &self,
        client: &JiraClient,
        uri: String,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let payload = client.send(&uri, &options).await?;
        if let Some(warnings) = success_warnings(&payload) {
            debug!(uri = %uri, count = warnings.len(), "Response carried warnings");
            self.reporter.show_warnings(&warnings);
        }
        Ok(payload)
    }

    /// Report a failed request.
    pub fn show_errors(&self, error: &ApiError) {
        self.reporter.show_api_error(error);
    }

    /// Report a single pre-formatted error line.
    pub fn show_error(&self, message: &str) {
        self.reporter.show_error(message);
    }

    /// Snapshot of the loaded record.
    pub fn config(&self) -> Option<ConfigRecord> {
        self.store.read().as_ref().map(|store| store.record().clone())
    }

    /// Path of the loaded record.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.store.read().as_ref().map(|store| store.path().to_path_buf())
    }

    /// Mutate the loaded record and rewrite the file. Write failures are
    /// reported, not returned.
    pub fn update_config(&self, mutate: impl FnOnce(&mut ConfigRecord)) -> Result<(), ConfigError> {
        let mut guard = self.store.write();
        let store = guard.as_mut().ok_or(ConfigError::NotLoaded)?;
        mutate(store.record_mut());
        store.update_config_file(&self.reporter);
        Ok(())
    }

    /// Delete the record file.
    pub fn remove_config(&self) -> Result<(), ConfigError> {
        let guard = self.store.read();
        let store = guard.as_ref().ok_or(ConfigError::NotLoaded)?;
        store.remove_config_file(&self.reporter)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn table_style(&self) -> &TableStyle {
        &self.table_style
    }

    pub fn boards(&self) -> &dyn BoardHandler {
        self.boards.as_ref()
    }

    pub fn issues(&self) -> &dyn IssueHandler {
        self.issues.as_ref()
    }

    pub fn projects(&self) -> &dyn ProjectHandler {
        self.projects.as_ref()
    }

    pub fn users(&self) -> &dyn UserHandler {
        self.users.as_ref()
    }

    pub fn versions(&self) -> &dyn VersionHandler {
        self.versions.as_ref()
    }
}

/// Assembles a session. Unset collaborators fall back to the terminal prompter,
/// a stdout reporter and the REST handlers.
#[derive(Default)]
pub struct SessionBuilder {
    location: ConfigLocation,
    settings: Settings,
    prompter: Option<Arc<dyn Prompter>>,
    reporter: Option<Reporter>,
    boards: Option<Arc<dyn BoardHandler>>,
    issues: Option<Arc<dyn IssueHandler>>,
    projects: Option<Arc<dyn ProjectHandler>>,
    users: Option<Arc<dyn UserHandler>>,
    versions: Option<Arc<dyn VersionHandler>>,
}

impl SessionBuilder {
    pub fn config_location(mut self, location: ConfigLocation) -> Self {
        self.location = location;
        self
    }

    pub fn config_path(self, path: impl Into<PathBuf>) -> Self {
        self.config_location(ConfigLocation::Path(path.into()))
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = Some(prompter);
        self
    }

    pub fn reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn boards(mut self, handler: Arc<dyn BoardHandler>) -> Self {
        self.boards = Some(handler);
        self
    }

    pub fn issues(mut self, handler: Arc<dyn IssueHandler>) -> Self {
        self.issues = Some(handler);
        self
    }

    pub fn projects(mut self, handler: Arc<dyn ProjectHandler>) -> Self {
        self.projects = Some(handler);
        self
    }

    pub fn users(mut self, handler: Arc<dyn UserHandler>) -> Self {
        self.users = Some(handler);
        self
    }

    pub fn versions(mut self, handler: Arc<dyn VersionHandler>) -> Self {
        self.versions = Some(handler);
        self
    }

    pub fn build(self) -> Session {
        Session {
            location: self.location,
            settings: self.settings,
            store: RwLock::new(None),
            client: OnceLock::new(),
            prompter: self.prompter.unwrap_or_else(|| Arc::new(TerminalPrompter)),
            reporter: self.reporter.unwrap_or_default(),
            table_style: TableStyle::borderless(),
            boards: self.boards.unwrap_or_else(|| Arc::new(Boards)),
            issues: self.issues.unwrap_or_else(|| Arc::new(Issues)),
            projects: self.projects.unwrap_or_else(|| Arc::new(Projects)),
            users: self.users.unwrap_or_else(|| Arc::new(Users)),
            versions: self.versions.unwrap_or_else(|| Arc::new(Versions)),
        }
    }
}
