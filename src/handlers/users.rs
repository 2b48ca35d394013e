//! Users.

use super::{decoded, reported, UserHandler};
use crate::api::RequestOptions;
use crate::session::Session;
use crate::views::yes_no;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    email_address: Option<String>,
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Users;

#[async_trait]
impl UserHandler for Users {
    async fn list_users(&self, session: &Session) -> Option<usize> {
        let options = RequestOptions::get().with_query("maxResults=1000");
        let payload = reported(session, session.api_request("/users/search", options).await)?;
        let users: Vec<User> = decoded(session, payload)?;

        let mut table = session.table_style().table(vec!["Name", "Email", "Active"]);
        for user in &users {
            table.add_row(vec![
                user.display_name.clone(),
                user.email_address.clone().unwrap_or_default(),
                yes_no(user.active).to_string(),
            ]);
        }
        session.reporter().print(table);
        Some(users.len())
    }
}
