//! Integration tests for the background pollers with mock HTTP servers.

use flexboard::client::SchedulerClient;
use flexboard::model::ApiDescription;
use flexboard::poller::{PollConfig, Poller};
use flexboard::store::StateStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn poller_for(server: &MockServer, store: Arc<StateStore>, config: PollConfig) -> Poller {
    let client = Arc::new(SchedulerClient::new(
        server.uri(),
        Duration::from_secs(2),
    ));
    Poller::new(client, store, config)
}

#[tokio::test]
async fn test_successful_poll_replaces_store_wholesale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "activeTasks": ["a1"],
            "stagingTasks": ["s1"]
        })))
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let poller = poller_for(&server, Arc::clone(&store), PollConfig::default());

    assert!(poller.poll_tasks_once().await);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.tasks.active_tasks, vec!["a1"]);
    assert_eq!(snapshot.tasks.staging_tasks, vec!["s1"]);
    assert!(snapshot.tasks_refreshed_at.is_some());
}

#[tokio::test]
async fn test_failed_poll_keeps_last_good_value() {
    let server = MockServer::start().await;
    // First poll succeeds, every later one fails
    Mock::given(method("GET"))
        .and(path("/api/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "activeTasks": ["a1", "a2"]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/state"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let poller = poller_for(&server, Arc::clone(&store), PollConfig::default());

    assert!(poller.poll_tasks_once().await);
    let version_after_success = store.version();

    assert!(!poller.poll_tasks_once().await);
    assert!(!poller.poll_tasks_once().await);

    // Failures never reach the store
    let snapshot = store.snapshot();
    assert_eq!(snapshot.tasks.active_tasks, vec!["a1", "a2"]);
    assert_eq!(snapshot.version, version_after_success);
}

#[tokio::test]
async fn test_config_poll_failure_keeps_bootstrap_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let poller = poller_for(&server, Arc::clone(&store), PollConfig::default());

    assert!(!poller.poll_config_once().await);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.config.master_address, "127.0.0.1:5050");
    assert_eq!(snapshot.config.profiles.len(), 3);
}

#[tokio::test]
async fn test_started_loops_poll_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "profiles": {"xl": {"cpu": 8, "mem": 16}},
            "masterAddress": "10.0.0.9:5050",
            "apiPort": 8192
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pendingTasks": ["p1"]
        })))
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let poller = poller_for(&server, Arc::clone(&store), PollConfig::default());

    let handle = poller.start(CancellationToken::new());
    sleep(Duration::from_millis(300)).await;
    handle.shutdown().await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.config.master_address, "10.0.0.9:5050");
    assert_eq!(snapshot.tasks.pending_tasks, vec!["p1"]);
}

#[tokio::test]
async fn test_slow_responses_never_overlap_requests() {
    let server = MockServer::start().await;
    // Each response takes longer than it would for a timer-driven poller to
    // fire again; a sequential loop sends exactly one request in this window.
    Mock::given(method("GET"))
        .and(path("/api/state"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"activeTasks": ["a1"]}))
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let config = PollConfig {
        enabled: true,
        config_interval_seconds: 60,
        tasks_interval_seconds: 1,
    };
    let poller = poller_for(&server, Arc::clone(&store), config);

    let handle = poller.start(CancellationToken::new());
    sleep(Duration::from_millis(1400)).await;
    handle.shutdown().await;

    let task_requests = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/state")
        .count();
    assert_eq!(task_requests, 1);
}

#[tokio::test]
async fn test_shutdown_stops_polling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/state"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"activeTasks": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let poller = poller_for(&server, Arc::clone(&store), PollConfig::default());

    let handle = poller.start(CancellationToken::new());
    sleep(Duration::from_millis(200)).await;
    handle.shutdown().await;

    let version_at_shutdown = store.version();
    let requests_at_shutdown = server.received_requests().await.unwrap().len();

    sleep(Duration::from_millis(400)).await;
    assert_eq!(store.version(), version_at_shutdown);
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        requests_at_shutdown
    );
}

#[tokio::test]
async fn test_api_description_failure_keeps_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/application.wadl"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let poller = poller_for(&server, Arc::clone(&store), PollConfig::default());

    poller.load_api_description().await;

    assert_eq!(store.snapshot().api, ApiDescription::placeholder());
}

#[tokio::test]
async fn test_api_description_success_loads_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/application.wadl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<application><resources base="/api/"/></application>"#),
        )
        .mount(&server)
        .await;

    let store = Arc::new(StateStore::new());
    let poller = poller_for(&server, Arc::clone(&store), PollConfig::default());

    poller.load_api_description().await;

    match store.snapshot().api {
        ApiDescription::Loaded(document) => {
            assert_eq!(document["application"]["resources"]["@base"], "/api/");
        }
        ApiDescription::Unavailable(_) => panic!("Expected loaded description"),
    }
}
