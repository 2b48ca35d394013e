//! Issues: JQL listings, lookups and the three mutations the CLI exposes.

use super::{decoded, reported, IssueHandler};
use crate::api::{encode_segment, RequestOptions};
use crate::session::Session;
use crate::views::format_jira_date;
use async_trait::async_trait;
use owo_colors::OwoColorize;
use serde::Deserialize;
use serde_json::{json, Value};
use std::process::Command;
use tracing::{debug, info, warn};

const SEARCH_FIELDS: [&str; 3] = ["summary", "status", "updated"];
const SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    issues: Vec<IssueRow>,
}

#[derive(Debug, Deserialize)]
struct IssueRow {
    key: String,
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Debug, Default, Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    status: Option<Named>,
    #[serde(default)]
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Named {
    #[serde(alias = "displayName")]
    name: String,
}

/// Quote a value for use inside a JQL string literal.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

pub fn summary_jql(user: Option<&str>) -> String {
    let assignee = user.map(quote).unwrap_or_else(|| "currentUser()".to_string());
    format!(
        "assignee = {} AND resolution = Unresolved ORDER BY updated DESC",
        assignee
    )
}

pub fn project_jql(project: &str) -> String {
    format!("project = {} ORDER BY updated DESC", quote(project))
}

pub fn release_jql(project: &str, release: &str) -> String {
    format!(
        "project = {} AND fixVersion = {} ORDER BY updated DESC",
        quote(project),
        quote(release)
    )
}

/// Command used to open a URL on this platform.
/// Run `program url` and report whether it exited successfully.
async fn launch(program: &'static str, url: &str) -> bool {
    let target = url.to_string();
    let status =
        tokio::task::spawn_blocking(move || Command::new(program).arg(&target).status()).await;
    match status {
        Ok(Ok(status)) if status.success() => {
            debug!(url = %url, "Opened issue in browser");
            true
        }
        Ok(Ok(status)) => {
            warn!(url = %url, %status, "Browser opener failed");
            false
        }
        Ok(Err(e)) => {
            warn!(url = %url, error = %e, "No browser opener available");
            false
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Browser opener task failed");
            false
        }
    }
}

fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Issues;

impl Issues {
    async fn list(&self, session: &Session, jql: &str) -> Option<usize> {
        debug!(jql = jql, "Searching issues");
        let body = json!({
            "jql": jql,
            "fields": SEARCH_FIELDS,
            "maxResults": SEARCH_LIMIT,
        });
        let payload = reported(
            session,
            session.api_request("/search", RequestOptions::post(body)).await,
        )?;
        let page: SearchPage = decoded(session, payload)?;

        if page.issues.is_empty() {
            session.reporter().notice("No issues found.".yellow());
            return Some(0);
        }

        let mut table = session
            .table_style()
            .table(vec!["Key", "Status", "Summary", "Updated"]);
        for issue in &page.issues {
            table.add_row(vec![
                issue.key.clone(),
                issue
                    .fields
                    .status
                    .as_ref()
                    .map(|status| status.name.clone())
                    .unwrap_or_default(),
                issue.fields.summary.clone().unwrap_or_default(),
                issue
                    .fields
                    .updated
                    .as_deref()
                    .map(format_jira_date)
                    .unwrap_or_default(),
            ]);
        }
        session.reporter().print(table);
        Some(page.issues.len())
    }
}

#[async_trait]
impl IssueHandler for Issues {
    async fn summary(&self, session: &Session, user: Option<&str>) -> Option<usize> {
        self.list(session, &summary_jql(user)).await
    }

    async fn project_issues(&self, session: &Session, project: &str) -> Option<usize> {
        self.list(session, &project_jql(project)).await
    }

    async fn release_issues(
        &self,
        session: &Session,
        project: &str,
        release: &str,
    ) -> Option<usize> {
        self.list(session, &release_jql(project, release)).await
    }

    async fn search(&self, session: &Session, jql: &str) -> Option<usize> {
        self.list(session, jql).await
    }

    async fn find_issue(&self, session: &Session, key: &str) -> Option<Value> {
        let path = format!("/issue/{}", encode_segment(key));
        let issue = reported(session, session.api_request(&path, RequestOptions::get()).await)?;

        let fields = &issue["fields"];
        let text = |pointer: &str| {
            fields
                .pointer(pointer)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };

        let mut table = session.table_style().table(vec!["Field", "Value"]);
        table.add_row(vec!["Key".to_string(), key.to_string()]);
        table.add_row(vec!["Summary".to_string(), text("/summary")]);
        table.add_row(vec!["Status".to_string(), text("/status/name")]);
        table.add_row(vec!["Type".to_string(), text("/issuetype/name")]);
        table.add_row(vec!["Assignee".to_string(), text("/assignee/displayName")]);
        table.add_row(vec!["Reporter".to_string(), text("/reporter/displayName")]);
        table.add_row(vec!["Updated".to_string(), format_jira_date(&text("/updated"))]);
        session.reporter().print(table);

        let description = text("/description");
        if !description.is_empty() {
            session.reporter().notice(description);
        }
        Some(issue)
    }

    async fn assign_issue(&self, session: &Session, key: &str, user: &str) -> Option<()> {
        let path = format!("/issue/{}/assignee", encode_segment(key));
        let body = json!({ "name": user });
        reported(session, session.api_request(&path, RequestOptions::put(body)).await)?;
        info!(issue = key, assignee = user, "Issue assigned");
        session.reporter().notice(format!(
            "Issue {} assigned to {}",
            key.blue().bold(),
            user.green().bold()
        ));
        Some(())
    }

    async fn make_transition(&self, session: &Session, key: &str, transition: &str) -> Option<()> {
        let path = format!("/issue/{}/transitions", encode_segment(key));
        let body = json!({ "transition": { "id": transition } });
        reported(session, session.api_request(&path, RequestOptions::post(body)).await)?;
        info!(issue = key, transition = transition, "Issue transitioned");
        session
            .reporter()
            .notice(format!("Issue {} transitioned.", key.blue().bold()));
        Some(())
    }

    async fn add_comment(&self, session: &Session, key: &str, comment: &str) -> Option<()> {
        let path = format!("/issue/{}/comment", encode_segment(key));
        let body = json!({ "body": comment });
        reported(session, session.api_request(&path, RequestOptions::post(body)).await)?;
        info!(issue = key, "Comment added");
        session
            .reporter()
            .notice(format!("Comment added to {}.", key.blue().bold()));
        Some(())
    }

    async fn open_issue(&self, session: &Session, key: &str) -> Option<()> {
        let url = reported(session, session.client().map(|client| client.browse_url(key)))?;
        if !launch(opener(), &url).await {
            session.reporter().print(&url);
        }
        Some(())
    }
}
