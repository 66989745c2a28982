//! Credential validator behavior against a mocked platform endpoint: every
//! shape other than "signed in with a username" must come back as absent.

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leetcode_mcp::auth::{GraphqlValidator, ValidateCredentials};

async fn server_returning(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn signed_in_user_validates_to_username() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("userStatus"))
        .and(header("x-csrftoken", "csrf-abc"))
        .and(header(
            "cookie",
            "csrftoken=csrf-abc; LEETCODE_SESSION=sess-xyz",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "userStatus": { "username": "alice", "isSignedIn": true } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let validator = GraphqlValidator::new(server.uri());
    assert_eq!(
        validator.validate("csrf-abc", "sess-xyz").await.as_deref(),
        Some("alice")
    );
}

#[tokio::test]
async fn signed_out_flag_is_invalid() {
    let server = server_returning(serde_json::json!({
        "data": { "userStatus": { "username": "alice", "isSignedIn": false } }
    }))
    .await;
    let validator = GraphqlValidator::new(server.uri());
    assert_eq!(validator.validate("a", "b").await, None);
}

#[tokio::test]
async fn empty_username_is_invalid() {
    let server = server_returning(serde_json::json!({
        "data": { "userStatus": { "username": "", "isSignedIn": true } }
    }))
    .await;
    let validator = GraphqlValidator::new(server.uri());
    assert_eq!(validator.validate("a", "b").await, None);
}

#[tokio::test]
async fn missing_user_status_is_invalid() {
    let server = server_returning(serde_json::json!({ "data": {} })).await;
    let validator = GraphqlValidator::new(server.uri());
    assert_eq!(validator.validate("a", "b").await, None);
}

#[tokio::test]
async fn malformed_body_is_invalid_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;
    let validator = GraphqlValidator::new(server.uri());
    assert_eq!(validator.validate("a", "b").await, None);
}

#[tokio::test]
async fn server_error_is_invalid_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let validator = GraphqlValidator::new(server.uri());
    assert_eq!(validator.validate("a", "b").await, None);
}

#[tokio::test]
async fn unreachable_endpoint_is_invalid_not_an_error() {
    // Nothing is listening on this port.
    let validator = GraphqlValidator::new("http://127.0.0.1:9");
    assert_eq!(validator.validate("a", "b").await, None);
}
