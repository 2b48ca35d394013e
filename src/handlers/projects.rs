//! Projects.

use super::{decoded, reported, ProjectHandler};
use crate::api::RequestOptions;
use crate::session::Session;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Project {
    key: String,
    name: String,
    #[serde(default)]
    project_type_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Projects;

#[async_trait]
impl ProjectHandler for Projects {
    async fn list(&self, session: &Session) -> Option<usize> {
        let payload = reported(session, session.api_request("/project", RequestOptions::get()).await)?;
        let projects: Vec<Project> = decoded(session, payload)?;

        let mut table = session.table_style().table(vec!["Key", "Name", "Type"]);
        for project in &projects {
            table.add_row(vec![
                project.key.clone(),
                project.name.clone(),
                project.project_type_key.clone().unwrap_or_default(),
            ]);
        }
        session.reporter().print(table);
        Some(projects.len())
    }
}
