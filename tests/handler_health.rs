mod common;

use common::{MemoryStore, StubSocialApi, TOKEN, create_test_server};
use serde_json::Value;
use social_leaderboard::infrastructure::store::{CacheStore, NullStore, StoreStatus};
use std::sync::Arc;

#[tokio::test]
async fn test_health_reports_connected_store() {
    let api = Arc::new(StubSocialApi::alice_and_bob());
    let store = Arc::new(MemoryStore::new());
    let server = create_test_server(api, store, TOKEN);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["redis_status"], "connected");
}

#[tokio::test]
async fn test_health_reports_disabled_store() {
    let api = Arc::new(StubSocialApi::alice_and_bob());
    let store: Arc<dyn CacheStore> = Arc::new(NullStore::new());
    let server = create_test_server(api, store, TOKEN);

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["redis_status"], "disabled");
}

#[tokio::test]
async fn test_health_follows_store_status() {
    let api = Arc::new(StubSocialApi::alice_and_bob());
    let status = StoreStatus::enabled();
    let store = Arc::new(MemoryStore::with_status(status.clone()));
    let server = create_test_server(api, store, TOKEN);

    assert_eq!(server.get("/health").await.json::<Value>()["redis_status"], "connected");

    status.disable();

    assert_eq!(server.get("/health").await.json::<Value>()["redis_status"], "disabled");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let api = Arc::new(StubSocialApi::alice_and_bob());
    let store = Arc::new(MemoryStore::new());
    let server = create_test_server(api, store, TOKEN);

    let json = server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("redis_status").is_some());
    assert!(json.get("memory_usage").is_some());
    assert!(json["uptime"].as_f64().unwrap() >= 0.0);

    let server_time = json["server_time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(server_time).is_ok());
}
