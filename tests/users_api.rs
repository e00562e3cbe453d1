//! HTTP tests for the user endpoints

mod common;

use axum::http::StatusCode;
use common::{empty_server, keys, seeded_server, user_id};
use serde_json::{Value, json};

fn new_user(username: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "secret1"
    })
}

#[tokio::test]
async fn test_list_users_envelope() {
    let (server, _) = seeded_server().await;

    let response = server.post("/api/users").json(&json!({})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        keys(&body),
        vec!["code", "data", "message", "page", "pageSize", "success", "total"]
    );
    assert_eq!(body["code"], 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 6);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_list_users_without_body() {
    let (server, _) = seeded_server().await;

    let body: Value = server.post("/api/users").await.json();
    assert_eq!(body["total"], 6);
}

#[tokio::test]
async fn test_user_json_never_exposes_password() {
    let (server, _) = seeded_server().await;

    let body: Value = server.post("/api/users").json(&json!({})).await.json();
    for user in body["data"].as_array().unwrap() {
        assert!(user.get("hashedPassword").is_none());
        assert!(user.get("hashed_password").is_none());
        assert!(user.get("password").is_none());
        assert!(user.get("firstName").is_some());
        assert!(user.get("createdAt").is_some());
    }
}

#[tokio::test]
async fn test_list_users_filters_by_status_and_role() {
    let (server, _) = seeded_server().await;

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "status": "active" }))
        .await
        .json();
    assert_eq!(body["total"], 3);

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "status": "active", "role": "manager" }))
        .await
        .json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["username"], "lisi");

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "role": "cashier" }))
        .await
        .json();
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_unknown_status_filter_matches_nothing() {
    let (server, _) = seeded_server().await;

    let response = server
        .post("/api/users")
        .json(&json!({ "status": "retired" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_search_is_case_insensitive_across_fields() {
    let (server, _) = seeded_server().await;

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "search": "ZHANG" }))
        .await
        .json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["username"], "zhangsan");

    // phone numbers are searchable too
    let body: Value = server
        .post("/api/users")
        .json(&json!({ "search": "13900000004" }))
        .await
        .json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["username"], "wangwu");

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "search": "example.com" }))
        .await
        .json();
    assert_eq!(body["total"], 6);
}

#[tokio::test]
async fn test_sort_users_by_username() {
    let (server, _) = seeded_server().await;

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "sort_by": "username", "sort_order": "asc" }))
        .await
        .json();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["lisi", "qianqi", "superadmin", "wangwu", "zhangsan", "zhaoliu"]
    );
}

#[tokio::test]
async fn test_detail() {
    let (server, _) = seeded_server().await;
    let id = user_id(&server, "lisi").await;

    let response = server
        .post("/api/users/detail")
        .json(&json!({ "user_id": id }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["role"], "manager");
}

#[tokio::test]
async fn test_detail_unknown_user_is_404_envelope() {
    let (server, _) = seeded_server().await;

    let response = server
        .post("/api/users/detail")
        .json(&json!({ "user_id": "missing" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_create_user_with_defaults() {
    let (server, _) = empty_server();

    let response = server
        .post("/api/users/create")
        .json(&json!({ "user_data": new_user("ada") }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["username"], "ada");
    assert_eq!(body["status"], "active");
    assert_eq!(body["role"], "cashier");
    assert_eq!(body["phoneNumber"], Value::Null);
    assert!(body["id"].as_str().is_some_and(|id| id.len() == 36));
}

#[tokio::test]
async fn test_create_user_then_login() {
    let (server, _) = empty_server();
    server
        .post("/api/users/create")
        .json(&json!({ "user_data": new_user("ada") }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "ada", "password": "secret1" }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_create_duplicate_username_or_email_is_400() {
    let (server, _) = seeded_server().await;

    let response = server
        .post("/api/users/create")
        .json(&json!({ "user_data": new_user("lisi") }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "username already exists");

    let mut data = new_user("someone");
    data["email"] = json!("lisi@example.com");
    let response = server
        .post("/api/users/create")
        .json(&json!({ "user_data": data }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "email already exists");
}

#[tokio::test]
async fn test_create_user_validation_is_422_with_fields() {
    let (server, _) = empty_server();

    let mut data = new_user("ab");
    data["email"] = json!("not-an-email");
    data["password"] = json!("123");

    let response = server
        .post("/api/users/create")
        .json(&json!({ "user_data": data }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["data"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"user_data.email"));
    assert!(fields.contains(&"user_data.username"));
    assert!(fields.contains(&"user_data.password"));
}

#[tokio::test]
async fn test_create_user_with_unknown_role_is_422() {
    let (server, _) = empty_server();

    let mut data = new_user("ada");
    data["role"] = json!("emperor");

    server
        .post("/api/users/create")
        .json(&json!({ "user_data": data }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_user() {
    let (server, _) = seeded_server().await;
    let id = user_id(&server, "wangwu").await;

    let response = server
        .post("/api/users/update")
        .json(&json!({
            "user_id": id,
            "user_data": { "firstName": "Wang", "status": "active", "phoneNumber": null }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "active");
    assert_eq!(body["phoneNumber"], Value::Null);
    assert_eq!(body["lastName"], "Wu");
}

#[tokio::test]
async fn test_update_to_own_username_is_allowed() {
    let (server, _) = seeded_server().await;
    let id = user_id(&server, "wangwu").await;

    server
        .post("/api/users/update")
        .json(&json!({ "user_id": id, "user_data": { "username": "wangwu" } }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_to_taken_username_is_400() {
    let (server, _) = seeded_server().await;
    let id = user_id(&server, "wangwu").await;

    server
        .post("/api/users/update")
        .json(&json!({ "user_id": id, "user_data": { "username": "lisi" } }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_username() {
    let (server, _) = empty_server();

    let create = |email: &'static str| {
        let server = &server;
        async move {
            let mut user = new_user("samename");
            user["email"] = json!(email);
            server
                .post("/api/users/create")
                .json(&json!({ "user_data": user }))
                .await
        }
    };
    let (first, second) = tokio::join!(create("one@example.com"), create("two@example.com"));

    let mut statuses = vec![first.status_code(), second.status_code()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "search": "samename" }))
        .await
        .json();
    assert_eq!(body["total"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_renames_to_same_username() {
    let (server, _) = seeded_server().await;
    let wangwu = user_id(&server, "wangwu").await;
    let qianqi = user_id(&server, "qianqi").await;

    let rename = |id: String| {
        let server = &server;
        async move {
            server
                .post("/api/users/update")
                .json(&json!({ "user_id": id, "user_data": { "username": "samename" } }))
                .await
        }
    };
    let (first, second) = tokio::join!(rename(wangwu), rename(qianqi));

    let mut statuses = vec![first.status_code(), second.status_code()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);

    let body: Value = server
        .post("/api/users")
        .json(&json!({ "search": "samename" }))
        .await
        .json();
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_update_unknown_user_is_404() {
    let (server, _) = seeded_server().await;

    server
        .post("/api/users/update")
        .json(&json!({ "user_id": "missing", "user_data": {} }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let (server, _) = seeded_server().await;
    let id = user_id(&server, "qianqi").await;

    let response = server
        .post("/api/users/delete")
        .json(&json!({ "user_id": id }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(keys(&body), vec!["code", "message", "success"]);
    assert_eq!(body["message"], "User deleted successfully");

    server
        .post("/api/users/delete")
        .json(&json!({ "user_id": id }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_delete_reports_failures() {
    let (server, _) = seeded_server().await;
    let lisi = user_id(&server, "lisi").await;
    let wangwu = user_id(&server, "wangwu").await;

    let response = server
        .post("/api/users/bulk-delete")
        .json(&json!({ "ids": [lisi, "ghost", wangwu] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted_count"], 2);
    assert_eq!(body["failed_count"], 1);
    assert_eq!(body["failed_ids"], json!(["ghost"]));

    let stats: Value = server.post("/api/users/stats").await.json();
    assert_eq!(stats["total_users"], 4);
}

#[tokio::test]
async fn test_bulk_delete_requires_ids() {
    let (server, _) = seeded_server().await;

    server
        .post("/api/users/bulk-delete")
        .json(&json!({ "ids": [] }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_invite_user() {
    let (server, _) = seeded_server().await;

    let response = server
        .post("/api/users/invite")
        .json(&json!({ "email": "grace@example.org", "role": "manager" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["invited_users"], json!(["grace@example.org"]));
    assert_eq!(body["message"], "Invitation sent successfully");

    let id = user_id(&server, "grace").await;
    let user: Value = server
        .post("/api/users/detail")
        .json(&json!({ "user_id": id }))
        .await
        .json();
    assert_eq!(user["status"], "invited");
    assert_eq!(user["role"], "manager");
    assert_eq!(user["firstName"], "Invited");
    assert_eq!(user["lastName"], "User");
}

#[tokio::test]
async fn test_invite_existing_email_or_username_is_400() {
    let (server, _) = seeded_server().await;

    server
        .post("/api/users/invite")
        .json(&json!({ "email": "lisi@example.com" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // new address, but the local part is a taken username
    server
        .post("/api/users/invite")
        .json(&json!({ "email": "lisi@elsewhere.org" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activate_and_suspend() {
    let (server, _) = seeded_server().await;
    let id = user_id(&server, "wangwu").await;

    let response = server
        .post("/api/users/activate")
        .json(&json!({ "user_id": id }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User activated successfully");

    let stats: Value = server.post("/api/users/stats").await.json();
    assert_eq!(stats["active_users"], 4);
    assert_eq!(stats["inactive_users"], 0);

    server
        .post("/api/users/suspend")
        .json(&json!({ "user_id": id }))
        .await
        .assert_status_ok();

    let stats: Value = server.post("/api/users/stats").await.json();
    assert_eq!(stats["suspended_users"], 2);

    server
        .post("/api/users/activate")
        .json(&json!({ "user_id": "missing" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_stats() {
    let (server, _) = seeded_server().await;

    let response = server.post("/api/users/stats").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "total_users": 6,
            "active_users": 3,
            "inactive_users": 1,
            "invited_users": 1,
            "suspended_users": 1
        })
    );
}
