//! Agile boards.

use super::{decoded, reported, Board, BoardHandler};
use crate::api::{encode_segment, RequestOptions};
use crate::config::BoardId;
use crate::session::Session;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardPage {
    #[serde(default)]
    values: Vec<Board>,
    #[serde(default = "default_last")]
    is_last: bool,
}

fn default_last() -> bool {
    true
}

/// REST implementation over `/rest/agile/1.0/board`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boards;

#[async_trait]
impl BoardHandler for Boards {
    async fn get_boards(&self, session: &Session) -> Option<Vec<Board>> {
        let mut boards = Vec::new();
        loop {
            let options = RequestOptions::get().with_query(format!("startAt={}", boards.len()));
            let payload = reported(session, session.agile_request("/board", options).await)?;
            let page: BoardPage = decoded(session, payload)?;
            let fetched = page.values.len();
            boards.extend(page.values);
            if page.is_last || fetched == 0 {
                break;
            }
        }
        debug!(count = boards.len(), "Boards fetched");
        Some(boards)
    }

    async fn get_board(&self, session: &Session, id: &BoardId) -> Option<Board> {
        let path = format!("/board/{}", encode_segment(&id.to_string()));
        let payload = reported(session, session.agile_request(&path, RequestOptions::get()).await)?;
        decoded(session, payload)
    }
}
