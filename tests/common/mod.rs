//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use fibery_tsheets::{Config, Connector, SyncRequest};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "test-access-token";

/// Connector pointed at a wiremock provider.
pub fn connector(server: &MockServer) -> Connector {
    let config = Config::new(&server.uri(), "client-id", "client-secret")
        .unwrap()
        .with_request_timeout(Duration::from_secs(5));
    Connector::new(&config).unwrap()
}

/// Provider user record as TSheets returns it.
pub fn provider_user(id: u64, name: &str, group_id: u64) -> Value {
    json!({
        "id": id,
        "display_name": name,
        "first_name": name,
        "last_name": "Tester",
        "active": true,
        "last_active": "2024-04-30T16:20:00-06:00",
        "group_id": group_id,
        "email": format!("{}@example.com", name.to_lowercase()),
        "pay_rate": 0,
        "permissions": {"admin": false}
    })
}

pub fn provider_group(id: u64, name: &str) -> Value {
    json!({"id": id, "name": name, "active": true, "manager_ids": []})
}

/// Wrap records in the provider's id-keyed envelope.
pub fn envelope(resource: &str, records: &[Value], more: bool) -> Value {
    let keyed: serde_json::Map<String, Value> = records
        .iter()
        .map(|r| (r["id"].to_string(), r.clone()))
        .collect();
    let mut results = serde_json::Map::new();
    results.insert(resource.to_string(), Value::Object(keyed));
    json!({
        "results": results,
        "more": more,
        "supplemental_data": {}
    })
}

/// Build a platform sync request from its JSON wire form.
pub fn sync_request(value: Value) -> SyncRequest {
    serde_json::from_value(value).unwrap()
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
pub async fn spawn_app(connector: Connector) -> String {
    let app = fibery_tsheets::build_router(Arc::new(connector));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}
