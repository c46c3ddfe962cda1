use bruteguard_core::api::{ResetLoginRequest, SubnetRequest};
use bruteguardctl::{
    commands,
    context::{AppContext, ServerSettings},
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context_for(server: &MockServer) -> AppContext {
    AppContext::new(ServerSettings {
        server: server.uri(),
    })
}

#[tokio::test]
async fn test_allowlist_add_posts_subnet() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/allowlist/add"))
        .and(body_json(json!({ "subnet": "10.0.0.0/8" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "10.0.0.0/8 added to allow list"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cmd = SubnetRequest {
        subnet: "10.0.0.0/8".to_string(),
    };
    commands::lists::add_allow(&context_for(&server), &cmd)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_conflict_fails_fast_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/denylist/add"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": true,
            "message": "10.0.0.0/8 already exists in allow list"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cmd = SubnetRequest {
        subnet: "10.0.0.0/8".to_string(),
    };
    let err = commands::lists::add_deny(&context_for(&server), &cmd)
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("10.0.0.0/8 already exists in allow list"));
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/buckets/reset/login"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/buckets/reset/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Bucket for login 'alice' reset"
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    let cmd = ResetLoginRequest {
        login: "alice".to_string(),
    };
    commands::buckets::reset_login(&context_for(&server), &cmd)
        .await
        .unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_show_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "allow": ["10.0.0.0/8"],
            "deny": ["192.168.1.0/24"],
            "allow_count": 1,
            "deny_count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    commands::lists::show_lists(&context_for(&server))
        .await
        .unwrap();
}
