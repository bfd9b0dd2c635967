//! Integration tests for the launch gate.
//!
//! Runs the resolver against a mock HTTP endpoint and an on-disk store, then
//! walks the gate through onboarding across simulated restarts.

use std::sync::Arc;

use sportiq_core::onboarding::default_pages;
use sportiq_core::remote_config::{RemoteConfigResolver, ResolutionSource};
use sportiq_core::storage::database::SqliteBackend;
use sportiq_core::storage::{keys, RemoteConfig};
use sportiq_core::{Event, Gate, ManualClock, Screen, Store};

const NOW: i64 = 1_750_000_000;

fn remote_config(endpoint: String) -> RemoteConfig {
    RemoteConfig {
        endpoint: Some(endpoint),
        ..RemoteConfig::default()
    }
}

fn resolver(store: &Store, clock: &ManualClock, config: &RemoteConfig) -> RemoteConfigResolver {
    RemoteConfigResolver::from_config(store.clone(), Arc::new(clock.clone()), config)
}

#[tokio::test]
async fn test_remote_redirect_wins_and_is_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/start")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "quiz": "https://play.example.com/welcome"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sportiq.db");
    let clock = ManualClock::at_unix(NOW);
    let config = remote_config(format!("{}/start", server.url()));

    {
        let store = Store::new(SqliteBackend::open(&db_path).unwrap());
        store.set(keys::IS_ONBOARDING_COMPLETED, &true).unwrap();
        let (gate, event) = Gate::cold_start(&resolver(&store, &clock, &config), default_pages()).await;
        assert_eq!(
            gate.screen(),
            &Screen::RemoteRedirect {
                destination: "https://play.example.com/welcome".into()
            }
        );
        assert!(matches!(
            event,
            Event::LaunchResolved {
                source: ResolutionSource::Remote,
                fetched: true,
                ..
            }
        ));
    }

    // Restart inside the cool-down: served from cache, no second request.
    clock.advance_secs(600);
    let store = Store::new(SqliteBackend::open(&db_path).unwrap());
    let (gate, event) = Gate::cold_start(&resolver(&store, &clock, &config), default_pages()).await;
    assert!(matches!(gate.screen(), Screen::RemoteRedirect { .. }));
    assert!(matches!(
        event,
        Event::LaunchResolved {
            source: ResolutionSource::Cache,
            fetched: false,
            ..
        }
    ));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_destination_shows_onboarding() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/start")
        .with_status(200)
        .with_body(r#"{"success": true, "quiz": "not a url"}"#)
        .create_async()
        .await;

    let store = Store::in_memory();
    let clock = ManualClock::at_unix(NOW);
    let config = remote_config(format!("{}/start", server.url()));

    let (gate, _) = Gate::cold_start(&resolver(&store, &clock, &config), default_pages()).await;

    assert_eq!(gate.screen(), &Screen::Onboarding);
    assert!(!store.flag(keys::CACHED_CONFIG_LOADED));
    assert_eq!(store.timestamp(keys::LAST_CONFIG_FETCH_TIME), NOW);
}

#[tokio::test]
async fn test_server_error_falls_back_to_main_app_after_onboarding() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/start")
        .with_status(500)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sportiq.db");
    let clock = ManualClock::at_unix(NOW);
    let config = remote_config(format!("{}/start", server.url()));

    {
        let store = Store::new(SqliteBackend::open(&db_path).unwrap());
        let (mut gate, _) =
            Gate::cold_start(&resolver(&store, &clock, &config), default_pages()).await;
        assert_eq!(gate.screen(), &Screen::Onboarding);
        while gate.screen() == &Screen::Onboarding {
            gate.next_page();
        }
        assert_eq!(gate.screen(), &Screen::MainApp);
    }

    clock.advance_secs(7200);
    let store = Store::new(SqliteBackend::open(&db_path).unwrap());
    let (gate, _) = Gate::cold_start(&resolver(&store, &clock, &config), default_pages()).await;
    assert_eq!(gate.screen(), &Screen::MainApp);
    assert!(store.flag(keys::IS_ONBOARDING_COMPLETED));
}
