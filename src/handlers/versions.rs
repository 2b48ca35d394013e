//! Project versions (releases).

use super::{decoded, reported, VersionHandler};
use crate::api::{encode_segment, RequestOptions};
use crate::session::Session;
use crate::views::yes_no;
use async_trait::async_trait;
use owo_colors::OwoColorize;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Version {
    name: String,
    #[serde(default)]
    released: bool,
    #[serde(default)]
    release_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Versions;

#[async_trait]
impl VersionHandler for Versions {
    async fn list_versions(&self, session: &Session, project: &str) -> Option<usize> {
        let path = format!("/project/{}/versions", encode_segment(project));
        let payload = reported(session, session.api_request(&path, RequestOptions::get()).await)?;
        let versions: Vec<Version> = decoded(session, payload)?;

        let mut table = session
            .table_style()
            .table(vec!["Name", "Released", "Release date"]);
        for version in &versions {
            table.add_row(vec![
                version.name.clone(),
                yes_no(version.released).to_string(),
                version.release_date.clone().unwrap_or_default(),
            ]);
        }
        session.reporter().print(table);
        Some(versions.len())
    }

    async fn create_version(&self, session: &Session, project: &str, name: &str) -> Option<()> {
        let body = json!({ "name": name, "project": project });
        reported(
            session,
            session.api_request("/version", RequestOptions::post(body)).await,
        )?;
        info!(project = project, version = name, "Version created");
        session.reporter().notice(format!(
            "Version {} created in {}",
            name.green().bold(),
            project.blue().bold()
        ));
        Some(())
    }
}
