//! Command routing: each invocation reaches exactly one handler call.

use crate::integration::test_utils::{ready_session, sample_record, TestSession};
use clap::Parser;
use jira_cli::cli::{
    Cli, CommandOutcome, CommandRouter, RELEASE_NEEDS_PROJECT, VERSION_NEEDS_PROJECT,
};
use tempfile::TempDir;

async fn route(test: &TestSession, args: &[&str]) -> CommandOutcome {
    let cli = Cli::try_parse_from(args).unwrap();
    let command = cli.command.expect("command");
    CommandRouter::new(&test.session)
        .dispatch(&command)
        .await
        .unwrap()
}

async fn calls_for(args: &[&str]) -> Vec<String> {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;
    route(&test, args).await;
    test.log.calls()
}

#[tokio::test]
async fn test_release_without_project_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    let outcome = route(&test, &["jira", "issue", "--release", "1.0"]).await;

    assert_eq!(outcome, CommandOutcome::Continue);
    assert!(test.log.calls().is_empty(), "no handler may be called");
    assert!(test.output.contents().contains(RELEASE_NEEDS_PROJECT));
}

#[tokio::test]
async fn test_issue_branches_without_key() {
    assert_eq!(
        calls_for(&["jira", "issue", "--release", "1.0", "-p", "TEST"]).await,
        vec!["issues.release_issues(TEST, 1.0)"]
    );
    assert_eq!(
        calls_for(&["jira", "issue", "-u", "jdoe", "-p", "TEST"]).await,
        vec!["issues.summary(Some(\"jdoe\"))"]
    );
    assert_eq!(
        calls_for(&["jira", "issue", "-p", "TEST"]).await,
        vec!["issues.project_issues(TEST)"]
    );
    assert_eq!(
        calls_for(&["jira", "issue"]).await,
        vec!["issues.summary(None)"]
    );
}

#[tokio::test]
async fn test_issue_branches_with_key() {
    assert_eq!(
        calls_for(&["jira", "issue", "TEST-1", "-a", "jdoe", "-t", "31"]).await,
        vec!["issues.assign_issue(TEST-1, jdoe)"]
    );
    assert_eq!(
        calls_for(&["jira", "issue", "TEST-1", "-t", "31"]).await,
        vec!["issues.make_transition(TEST-1, 31)"]
    );
    assert_eq!(
        calls_for(&["jira", "issue", "TEST-1", "-c", "Looks good"]).await,
        vec!["issues.add_comment(TEST-1, Looks good)"]
    );
    assert_eq!(
        calls_for(&["jira", "issue", "TEST-1"]).await,
        vec!["issues.find_issue(TEST-1)"]
    );
}

#[tokio::test]
async fn test_version_creates_only_with_number() {
    assert_eq!(
        calls_for(&["jira", "version", "TEST", "-n", "2.0"]).await,
        vec!["versions.create_version(TEST, 2.0)"]
    );
    assert_eq!(
        calls_for(&["jira", "version", "TEST"]).await,
        vec!["versions.list_versions(TEST)"]
    );
}

#[tokio::test]
async fn test_bare_version_prints_package_version() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    route(&test, &["jira", "version"]).await;
    assert!(test.log.calls().is_empty());
    assert!(test.output.contents().contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_version_number_without_project_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    let outcome = route(&test, &["jira", "version", "-n", "2.0"]).await;

    assert_eq!(outcome, CommandOutcome::Continue);
    assert!(test.log.calls().is_empty(), "no handler may be called");
    let output = test.output.contents();
    assert!(output.contains(VERSION_NEEDS_PROJECT));
    assert!(!output.contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_project_and_user_list_only_without_argument() {
    assert_eq!(calls_for(&["jira", "project"]).await, vec!["projects.list"]);
    assert_eq!(calls_for(&["jira", "user"]).await, vec!["users.list_users"]);
    assert!(calls_for(&["jira", "project", "show"]).await.is_empty());
    assert!(calls_for(&["jira", "user", "show"]).await.is_empty());
}

#[tokio::test]
async fn test_search_and_open_delegate_to_issues() {
    assert_eq!(
        calls_for(&["jira", "search", "project = TEST"]).await,
        vec!["issues.search(project = TEST)"]
    );
    assert_eq!(
        calls_for(&["jira", "open", "TEST-9"]).await,
        vec!["issues.open_issue(TEST-9)"]
    );
}

#[tokio::test]
async fn test_config_without_field_prints_docs() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    let outcome = route(&test, &["jira", "config"]).await;
    assert_eq!(outcome, CommandOutcome::Continue);
    assert!(test.output.contents().contains("Usage:  config"));
}

#[tokio::test]
async fn test_config_remove_terminates() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;

    let outcome = route(&test, &["jira", "config", "remove"]).await;
    assert_eq!(outcome, CommandOutcome::Terminate);
    assert!(!test.config_path.exists());
}

#[tokio::test]
async fn test_config_remove_of_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let test = ready_session(&dir, &sample_record(), vec![]).await;
    std::fs::remove_file(&test.config_path).unwrap();

    let cli = Cli::try_parse_from(["jira", "config", "remove"]).unwrap();
    let result = CommandRouter::new(&test.session)
        .dispatch(cli.command.as_ref().unwrap())
        .await;
    assert!(result.is_err());
}

#[test]
fn test_unknown_config_field_is_rejected_by_parser() {
    assert!(Cli::try_parse_from(["jira", "config", "colour"]).is_err());
}

#[test]
fn test_no_subcommand_parses() {
    let cli = Cli::try_parse_from(["jira"]).unwrap();
    assert!(cli.command.is_none());
}
