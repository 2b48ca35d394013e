//! `config <field>` updates against a real file.

use crate::integration::test_utils::{
    answers, build_session, read_config_json, ready_session, sample_record, text,
};
use jira_cli::config::{update_config_record, BoardId, ConfigField, UpdateOptions};
use jira_cli::session::{InitOutcome, SessionState};
use tempfile::TempDir;

const SET: UpdateOptions = UpdateOptions {
    set: true,
    remove: false,
};
const REMOVE: UpdateOptions = UpdateOptions {
    set: false,
    remove: true,
};

#[tokio::test]
async fn test_host_without_value_shows_current() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    update_config_record(&test.session, ConfigField::Host, None, UpdateOptions::default())
        .await
        .unwrap();

    let output = test.output.contents();
    assert!(output.contains("Current host:"));
    assert!(output.contains("example.atlassian.net"));
}

#[tokio::test]
async fn test_host_and_username_are_persisted() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    update_config_record(
        &test.session,
        ConfigField::Host,
        Some("jira.internal"),
        UpdateOptions::default(),
    )
    .await
    .unwrap();
    update_config_record(
        &test.session,
        ConfigField::Username,
        Some("ops"),
        UpdateOptions::default(),
    )
    .await
    .unwrap();

    let written = read_config_json(&test.config_path);
    assert_eq!(written["host"], "jira.internal");
    assert_eq!(written["username"], "ops");
    assert_eq!(written["password"], "token");
    assert!(test.output.contents().contains("Config file successfully updated."));
}

#[tokio::test]
async fn test_unusable_host_is_rejected_and_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;
    let before = std::fs::read_to_string(&test.config_path).unwrap();

    for bad in ["jira.example.com/jira", "exa mple"] {
        update_config_record(
            &test.session,
            ConfigField::Host,
            Some(bad),
            UpdateOptions::default(),
        )
        .await
        .unwrap();
    }

    assert_eq!(std::fs::read_to_string(&test.config_path).unwrap(), before);
    assert_eq!(test.session.config().unwrap().host, "example.atlassian.net");
    let output = test.output.contents();
    assert!(output.contains("Invalid Jira host: 'jira.example.com/jira'"));
    assert!(!output.contains("Config file successfully updated."));

    let next_run = build_session(test.config_path.clone(), vec![]);
    assert_eq!(next_run.session.init().await.unwrap(), InitOutcome::Ready);
    assert_eq!(next_run.session.state(), SessionState::ClientReady);
}

#[tokio::test]
async fn test_password_always_prompts() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(
        &dir,
        &sample_record(),
        vec![answers(&[("password", text(" new-token "))])],
    )
    .await;

    update_config_record(
        &test.session,
        ConfigField::Password,
        Some("ignored"),
        UpdateOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(test.prompter.asked().len(), 1);
    let written = read_config_json(&test.config_path);
    assert_eq!(written["password"], " new-token ");
}

#[tokio::test]
async fn test_board_set_persists_selected_id() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(
        &dir,
        &sample_record(),
        vec![answers(&[("board", text("Mobile"))])],
    )
    .await;

    update_config_record(&test.session, ConfigField::Board, None, SET)
        .await
        .unwrap();

    assert_eq!(test.log.calls(), vec!["boards.get_boards"]);
    assert_eq!(read_config_json(&test.config_path)["defaultBoard"], 12);
    assert_eq!(
        test.session.config().unwrap().default_board,
        Some(BoardId::Numeric(12))
    );
}

#[tokio::test]
async fn test_board_without_default_reports_error() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    update_config_record(&test.session, ConfigField::Board, None, REMOVE)
        .await
        .unwrap();

    assert!(test
        .output
        .contents()
        .contains("There is no default board set."));
    assert!(test.log.calls().is_empty());
}

#[tokio::test]
async fn test_board_remove_leaves_field_absent() {
    let dir = TempDir::new().unwrap();
    let mut record = sample_record();
    record.default_board = Some(BoardId::Numeric(7));
    let test = ready_session(&dir, &record, vec![]).await;

    update_config_record(&test.session, ConfigField::Board, None, REMOVE)
        .await
        .unwrap();

    let written = read_config_json(&test.config_path);
    assert!(written.get("defaultBoard").is_none());
    let raw = std::fs::read_to_string(&test.config_path).unwrap();
    assert!(!raw.contains("defaultBoard"));
}

#[tokio::test]
async fn test_board_shows_configured_board_name() {
    let dir = TempDir::new().unwrap();
    let mut record = sample_record();
    record.default_board = Some(BoardId::Numeric(7));
    let test = ready_session(&dir, &record, vec![]).await;

    update_config_record(
        &test.session,
        ConfigField::Board,
        None,
        UpdateOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(test.log.calls(), vec!["boards.get_board(7)"]);
    let output = test.output.contents();
    assert!(output.contains("Your default board is:"));
    assert!(output.contains("Platform"));
}

#[tokio::test]
async fn test_proxy_show_set_and_remove() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;
    let none = UpdateOptions::default();

    update_config_record(&test.session, ConfigField::Proxy, None, none)
        .await
        .unwrap();
    assert!(test.output.contents().contains("not defined"));

    update_config_record(
        &test.session,
        ConfigField::Proxy,
        Some("http://proxy.internal:3128"),
        none,
    )
    .await
    .unwrap();
    assert_eq!(
        read_config_json(&test.config_path)["proxy"],
        "http://proxy.internal:3128"
    );

    update_config_record(&test.session, ConfigField::Proxy, Some("remove"), none)
        .await
        .unwrap();
    assert!(read_config_json(&test.config_path).get("proxy").is_none());
}
