//! Writing a record and reloading it yields the same record.

use jira_cli::api::{agile_uri, classic_uri, Endpoint};
use jira_cli::config::{BoardId, ConfigRecord, ConfigStore, Protocol, CONFIG_FILE_NAME};
use jira_cli::report::Reporter;
use proptest::prelude::*;
use tempfile::TempDir;

fn board_id() -> impl Strategy<Value = Option<BoardId>> {
    prop_oneof![
        Just(None),
        any::<u64>().prop_map(|id| Some(BoardId::Numeric(id))),
        "[A-Za-z][A-Za-z0-9 _-]{0,12}".prop_map(|id| Some(BoardId::Text(id))),
    ]
}

fn record() -> impl Strategy<Value = ConfigRecord> {
    (
        any::<bool>(),
        "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,6}){0,2}",
        "[A-Za-z0-9@._-]{1,30}",
        any::<String>(),
        board_id(),
        proptest::option::of("http://[a-z]{1,10}:[0-9]{2,5}"),
    )
        .prop_map(|(https, host, username, password, board, proxy)| {
            let mut record =
                ConfigRecord::new(Protocol::from_https(https), host, username, password);
            record.default_board = board;
            record.proxy = proxy;
            record
        })
}

/// Saving then loading from the same path is lossless
#[test]
fn test_config_record_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&record(), |record| {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join(CONFIG_FILE_NAME);
            let (reporter, _output) = Reporter::buffered();

            let store = ConfigStore::from_parts(path.clone(), record.clone());
            store.update_config_file(&reporter);
            let reloaded = ConfigStore::load_config_file(&path).unwrap();

            prop_assert_eq!(reloaded, record);
            Ok(())
        })
        .unwrap();
}

/// Both builders prefix the pathname with their surface root on the same origin
#[test]
fn test_uri_builders_share_origin_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                "[a-z][a-z0-9-]{0,15}\\.[a-z]{2,6}",
                "(/[A-Za-z0-9-]{1,10}){1,3}",
            ),
            |(host, pathname)| {
                let endpoint = Endpoint::parse(Protocol::Https, &host).unwrap();
                let origin = format!("https://{}", host);

                prop_assert_eq!(
                    classic_uri(&endpoint, "2", &pathname, None),
                    format!("{}/rest/api/2{}", origin, pathname)
                );
                prop_assert_eq!(
                    agile_uri(&endpoint, &pathname, None),
                    format!("{}/rest/agile/1.0{}", origin, pathname)
                );
                Ok(())
            },
        )
        .unwrap();
}
