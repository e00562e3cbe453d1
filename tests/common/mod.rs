//! Shared harness for the HTTP integration tests

#![allow(dead_code)]

use axum_test::TestServer;
use mocker::config::{AppConfig, PasswordConfig};
use mocker::seed::seed;
use mocker::server::{AppState, ServerBuilder};
use serde_json::{Value, json};

pub const DEV_TOKEN: &str = "mock-token-for-development";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.password = PasswordConfig::fast();
    config
}

/// Server over empty stores
pub fn empty_server() -> (TestServer, AppState) {
    let state = AppState::new(test_config()).expect("valid test config");
    let server = TestServer::try_new(ServerBuilder::mock_api(state.clone()).build())
        .expect("Failed to create test server");
    (server, state)
}

/// Server over the sample users and tasks
pub async fn seeded_server() -> (TestServer, AppState) {
    let (server, state) = empty_server();
    seed(&state).await.expect("seed");
    (server, state)
}

/// Id of the seeded user with this username
pub async fn user_id(server: &TestServer, username: &str) -> String {
    let body: Value = server
        .post("/api/users")
        .json(&json!({ "search": username, "page_size": 100 }))
        .await
        .json();
    body["data"]
        .as_array()
        .and_then(|users| users.iter().find(|u| u["username"] == username))
        .and_then(|u| u["id"].as_str())
        .expect("seeded user")
        .to_string()
}

/// Create a task and return its JSON
pub async fn create_task(server: &TestServer, task_data: Value) -> Value {
    let response = server
        .post("/api/tasks/create")
        .json(&json!({ "task_data": task_data }))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Sorted keys of a JSON object
pub fn keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}
