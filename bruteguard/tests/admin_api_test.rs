mod common;

use axum::http::StatusCode;
use bruteguard_core::api::{AddressListsResponse, SuccessResponse};
use common::{create_test_servers, test_settings};
use serde_json::json;

#[tokio::test]
async fn test_allow_list_add_duplicate_and_cross_list_conflicts() {
    let servers = create_test_servers(test_settings(&[])).await;

    let response = servers
        .admin
        .post("/api/v1/admin/allowlist/add")
        .json(&json!({ "subnet": "10.0.0.0/8" }))
        .await;
    response.assert_status_ok();
    assert!(response.json::<SuccessResponse>().success);

    let duplicate = servers
        .admin
        .post("/api/v1/admin/allowlist/add")
        .json(&json!({ "subnet": "10.0.0.0/8" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let cross = servers
        .admin
        .post("/api/v1/admin/denylist/add")
        .json(&json!({ "subnet": "10.0.0.0/8" }))
        .await;
    assert_eq!(cross.status_code(), StatusCode::CONFLICT);
    let body: serde_json::Value = cross.json();
    assert_eq!(body["message"], "10.0.0.0/8 already exists in allow list");

    let lists = servers
        .admin
        .get("/api/v1/admin/lists")
        .await
        .json::<AddressListsResponse>();
    assert_eq!(lists.allow, vec!["10.0.0.0/8".to_string()]);
    assert_eq!(lists.allow_count, 1);
    assert_eq!(lists.deny_count, 0);
}

#[tokio::test]
async fn test_remove_unknown_prefix_is_not_found() {
    let servers = create_test_servers(test_settings(&[])).await;

    let response = servers
        .admin
        .post("/api/v1/admin/denylist/remove")
        .json(&json!({ "subnet": "172.16.0.0/12" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_prefix_is_bad_request() {
    let servers = create_test_servers(test_settings(&[])).await;

    let response = servers
        .admin
        .post("/api/v1/admin/allowlist/add")
        .json(&json!({ "subnet": "10.0.0.0/99" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_unknown_buckets_is_not_found() {
    let servers = create_test_servers(test_settings(&[])).await;

    for (path, body) in [
        ("/api/v1/admin/buckets/reset/login", json!({ "login": "ghost" })),
        ("/api/v1/admin/buckets/reset/password", json!({ "password": "pw" })),
        ("/api/v1/admin/buckets/reset/ip", json!({ "ip": "10.9.9.9" })),
    ] {
        let response = servers.admin.post(path).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_reset_ip_rejects_invalid_address() {
    let servers = create_test_servers(test_settings(&[])).await;

    let response = servers
        .admin
        .post("/api/v1/admin/buckets/reset/ip")
        .json(&json!({ "ip": "10.0.0.300" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_file_backend_persists_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.yaml");
    let path_str = path.to_str().unwrap().to_string();

    let settings = test_settings(&[
        ("address_list.backend", "file"),
        ("address_list.path", path_str.as_str()),
    ]);
    let servers = create_test_servers(settings.clone()).await;
    servers
        .admin
        .post("/api/v1/admin/denylist/add")
        .json(&json!({ "subnet": "192.168.1.0/24" }))
        .await
        .assert_status_ok();

    let restarted = create_test_servers(settings).await;
    let lists = restarted
        .admin
        .get("/api/v1/admin/lists")
        .await
        .json::<AddressListsResponse>();
    assert_eq!(lists.deny, vec!["192.168.1.0/24".to_string()]);
}

#[tokio::test]
async fn test_openapi_document_lists_admin_paths() {
    let servers = create_test_servers(test_settings(&[])).await;

    let doc: serde_json::Value = servers.admin.get("/api/v1/openapi.json").await.json();
    assert!(doc["paths"]["/api/v1/admin/lists"].is_object());
    assert!(doc["paths"]["/api/v1/auth/check"].is_object());
}
