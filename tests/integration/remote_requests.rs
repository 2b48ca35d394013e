//! Request primitives and REST handlers against a local one-shot responder.

use crate::integration::test_utils::{ready_session, sample_record, serve_once, write_config};
use jira_cli::api::RequestOptions;
use jira_cli::config::{ConfigRecord, Protocol};
use jira_cli::error::{ApiError, RemoteFailure};
use jira_cli::handlers::{BoardHandler, Boards, IssueHandler, Issues};
use jira_cli::report::{OutputBuffer, Reporter};
use jira_cli::session::{InitOutcome, Session};
use serde_json::json;
use tempfile::TempDir;

fn local_record(host: &str) -> ConfigRecord {
    ConfigRecord::new(Protocol::Http, host, "me@example.com", "token")
}

/// A ready session with the REST handlers, pointed at `host`.
async fn rest_session(dir: &TempDir, host: &str) -> (Session, OutputBuffer) {
    let path = write_config(dir, &local_record(host));
    let (reporter, output) = Reporter::buffered();
    let session = Session::builder()
        .config_path(path)
        .reporter(reporter)
        .build();
    assert_eq!(session.init().await.unwrap(), InitOutcome::Ready);
    (session, output)
}

#[tokio::test]
async fn test_unauthorized_is_classified_at_the_client() {
    let dir = TempDir::new().unwrap();
    let (host, server) = serve_once(401, r#"{"errorMessages":["ignored"]}"#);
    let test = ready_session(&dir, &local_record(&host), vec![]).await;

    let result = test
        .session
        .api_request("/myself", RequestOptions::get())
        .await;
    let (head, _) = server.join().unwrap();

    assert!(head.starts_with("GET /rest/api/2/myself HTTP/1.1"));
    assert!(head.to_ascii_lowercase().contains("authorization: basic"));
    let error = result.unwrap_err();
    assert!(matches!(error, ApiError::Remote(RemoteFailure::Unauthorized)));

    test.session.show_errors(&error);
    let output = test.output.contents();
    assert!(output.contains("Error trying to authenticate"));
    assert!(!output.contains("ignored"));
}

#[tokio::test]
async fn test_validation_messages_win_over_field_errors() {
    let dir = TempDir::new().unwrap();
    let (host, server) = serve_once(
        400,
        r#"{"errorMessages":["A","B"],"errors":{"x":"C"}}"#,
    );
    let test = ready_session(&dir, &local_record(&host), vec![]).await;

    let result = test
        .session
        .api_request("/issue", RequestOptions::post(json!({})))
        .await;
    server.join().unwrap();

    assert!(matches!(
        result,
        Err(ApiError::Remote(RemoteFailure::ValidationErrors(ref messages)))
            if messages == &vec!["A".to_string(), "B".to_string()]
    ));
}

#[tokio::test]
async fn test_success_warnings_are_reported_and_payload_returned() {
    let dir = TempDir::new().unwrap();
    let (host, server) = serve_once(200, r#"{"warningMessages":["Deprecated"],"id":"1"}"#);
    let test = ready_session(&dir, &local_record(&host), vec![]).await;

    let payload = test
        .session
        .api_request("/project", RequestOptions::get())
        .await
        .unwrap();
    server.join().unwrap();

    assert_eq!(payload["id"], "1");
    assert!(test.output.contents().contains("Warning: Deprecated"));
}

#[tokio::test]
async fn test_boards_are_fetched_from_the_agile_surface() {
    let dir = TempDir::new().unwrap();
    let (host, server) = serve_once(
        200,
        r#"{"isLast":true,"values":[{"id":1,"name":"Team board"}]}"#,
    );
    let (session, _output) = rest_session(&dir, &host).await;

    let boards = Boards.get_boards(&session).await.unwrap();
    let (head, _) = server.join().unwrap();

    assert!(head.starts_with("GET /rest/agile/1.0/board?startAt=0 HTTP/1.1"));
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "Team board");
}

#[tokio::test]
async fn test_assign_sends_assignee_body() {
    let dir = TempDir::new().unwrap();
    let (host, server) = serve_once(200, "");
    let (session, output) = rest_session(&dir, &host).await;

    let result = Issues.assign_issue(&session, "TEST-1", "jdoe").await;
    let (head, body) = server.join().unwrap();

    assert_eq!(result, Some(()));
    assert!(head.starts_with("PUT /rest/api/2/issue/TEST-1/assignee HTTP/1.1"));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&body).unwrap(),
        json!({ "name": "jdoe" })
    );
    assert!(output.contents().contains("assigned to"));
}

#[tokio::test]
async fn test_handler_failures_are_reported_not_raised() {
    let dir = TempDir::new().unwrap();
    let (host, server) = serve_once(404, r#"{"errorMessages":["Issue does not exist"]}"#);
    let (session, output) = rest_session(&dir, &host).await;

    let result = Issues.find_issue(&session, "NOPE-1").await;
    server.join().unwrap();

    assert!(result.is_none());
    assert!(output.contents().contains("Error: Issue does not exist"));
}

#[tokio::test]
async fn test_sample_record_targets_https_origin() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;
    assert_eq!(
        test.session.client().unwrap().agile_uri("/board/1", None),
        "https://example.atlassian.net/rest/agile/1.0/board/1"
    );
}

#[tokio::test]
async fn test_requests_travel_through_configured_proxy() {
    let dir = TempDir::new().unwrap();
    let (proxy_addr, proxy) = serve_once(200, r#"{"ok":true}"#);
    let mut record = local_record("tracker.invalid");
    record.proxy = Some(format!("http://{}", proxy_addr));
    let test = ready_session(&dir, &record, vec![]).await;

    let payload = test
        .session
        .api_request("/myself", RequestOptions::get())
        .await
        .unwrap();
    let (head, _) = proxy.join().unwrap();

    assert!(head.starts_with("GET http://tracker.invalid/rest/api/2/myself HTTP/1.1"));
    assert_eq!(payload, json!({ "ok": true }));
}

#[tokio::test]
async fn test_requests_without_proxy_go_direct() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &local_record("tracker.invalid"), vec![]).await;

    let result = test
        .session
        .api_request("/myself", RequestOptions::get())
        .await;

    assert!(matches!(
        result,
        Err(ApiError::Remote(RemoteFailure::Unknown(ref message))) if message.contains("error")
    ));
}
