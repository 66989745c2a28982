//! Submission orchestrator tests against a mocked judging backend: the
//! credential and language guards, the bounded poll loop, and outcome
//! classification.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use leetcode_mcp::auth::{CredentialStore, Credentials, FileCredentialStore};
use leetcode_mcp::client::LeetCodeClient;
use leetcode_mcp::config::ServerConfig;
use leetcode_mcp::submit::{SubmissionOrchestrator, SubmissionOutcome, SubmissionRequest};

use common::InstantSleeper;

/// Responds with a pending state until the configured attempt, then with the
/// given terminal body.
struct PendingThen {
    terminal_on: u32,
    terminal_body: serde_json::Value,
    hits: AtomicU32,
}

impl PendingThen {
    fn new(terminal_on: u32, terminal_body: serde_json::Value) -> Self {
        Self {
            terminal_on,
            terminal_body,
            hits: AtomicU32::new(0),
        }
    }
}

impl Respond for PendingThen {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let attempt = self.hits.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt >= self.terminal_on {
            ResponseTemplate::new(200).set_body_json(&self.terminal_body)
        } else {
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "state": "PENDING" }))
        }
    }
}

fn accepted_body() -> serde_json::Value {
    serde_json::json!({
        "state": "SUCCESS",
        "status_msg": "Accepted",
        "runtime": "2 ms",
        "memory": "10.0 MB",
    })
}

struct Fixture {
    _dir: TempDir,
    orchestrator: SubmissionOrchestrator,
}

fn fixture(server_uri: &str, with_credentials: bool) -> Fixture {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileCredentialStore::new(dir.path()));
    if with_credentials {
        store
            .save(&Credentials::new("csrf-abc", "sess-xyz", None, Utc::now()))
            .unwrap();
    }
    let orchestrator = SubmissionOrchestrator::new(
        &ServerConfig::default(),
        store,
        LeetCodeClient::new(server_uri),
        Arc::new(InstantSleeper),
    );
    Fixture {
        _dir: dir,
        orchestrator,
    }
}

fn request(language: &str) -> SubmissionRequest {
    SubmissionRequest {
        problem_slug: "two-sum".into(),
        code: "class Solution {}".into(),
        language: language.into(),
    }
}

async fn mount_resolution_and_submit(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("questionTitle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "question": { "questionId": "1", "questionFrontendId": "1" } }
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "submission_id": 123 })),
        )
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Guards before any network call
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_credentials_short_circuit_without_network() {
    let server = MockServer::start().await;
    // Any request at all would fail this expectation.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), false);
    let outcome = fx.orchestrator.submit(&request("python")).await;
    assert!(matches!(
        outcome,
        SubmissionOutcome::AuthorizationRequired { .. }
    ));
}

#[tokio::test]
async fn unsupported_language_short_circuits_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    let outcome = fx.orchestrator.submit(&request("cobol")).await;
    match outcome {
        SubmissionOutcome::UnsupportedLanguage { language, .. } => {
            assert_eq!(language, "cobol")
        }
        other => panic!("expected UnsupportedLanguage, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Poll loop bounds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accepted_on_the_final_allowed_poll() {
    let server = MockServer::start().await;
    mount_resolution_and_submit(&server).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/123/check/"))
        .respond_with(PendingThen::new(30, accepted_body()))
        .expect(30)
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    let outcome = fx.orchestrator.submit(&request("python")).await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Accepted {
            runtime: "2 ms".into(),
            memory: "10.0 MB".into(),
        }
    );
}

#[tokio::test]
async fn never_terminal_times_out_after_exactly_thirty_polls() {
    let server = MockServer::start().await;
    mount_resolution_and_submit(&server).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/123/check/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "state": "STARTED" })),
        )
        .expect(30)
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    let outcome = fx.orchestrator.submit(&request("python")).await;
    assert!(matches!(outcome, SubmissionOutcome::Timeout { .. }));
    // The .expect(30) on the mock asserts "never more" when the server
    // verifies on drop.
}

#[tokio::test]
async fn fast_verdict_stops_polling_early() {
    let server = MockServer::start().await;
    mount_resolution_and_submit(&server).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/123/check/"))
        .respond_with(PendingThen::new(1, accepted_body()))
        .expect(1)
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    let outcome = fx.orchestrator.submit(&request("python")).await;
    assert!(matches!(outcome, SubmissionOutcome::Accepted { .. }));
}

// ---------------------------------------------------------------------------
// Outcome classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_answer_reports_failing_test_case() {
    let server = MockServer::start().await;
    mount_resolution_and_submit(&server).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/123/check/"))
        .respond_with(PendingThen::new(
            2,
            serde_json::json!({
                "state": "SUCCESS",
                "status_msg": "Wrong Answer",
                "input": "[3,2,4]\n6",
                "expected_answer": ["[1,2]"],
                "code_answer": ["[0,1]"],
            }),
        ))
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    match fx.orchestrator.submit(&request("python")).await {
        SubmissionOutcome::Rejected {
            status_message,
            failed_test: Some(test),
            ..
        } => {
            assert_eq!(status_message, "Wrong Answer");
            assert_eq!(test.input, "[3,2,4]\n6");
            assert_eq!(test.expected.as_deref(), Some("[1,2]"));
            assert_eq!(test.actual.as_deref(), Some("[0,1]"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn compile_error_reports_diagnostic() {
    let server = MockServer::start().await;
    mount_resolution_and_submit(&server).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/123/check/"))
        .respond_with(PendingThen::new(
            1,
            serde_json::json!({
                "state": "SUCCESS",
                "status_msg": "Compile Error",
                "full_compile_error": "Line 1: error: expected ';'",
            }),
        ))
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    match fx.orchestrator.submit(&request("java")).await {
        SubmissionOutcome::JudgeError { diagnostic, .. } => {
            assert!(diagnostic.contains("expected ';'"))
        }
        other => panic!("expected JudgeError, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Session rejection vs transport failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejected_session_at_submit_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "question": { "questionId": "1", "questionFrontendId": "1" } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    let outcome = fx.orchestrator.submit(&request("python")).await;
    assert!(matches!(outcome, SubmissionOutcome::Unauthorized { .. }));
}

#[tokio::test]
async fn rejected_session_while_polling_is_unauthorized() {
    let server = MockServer::start().await;
    mount_resolution_and_submit(&server).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/123/check/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    let outcome = fx.orchestrator.submit(&request("python")).await;
    assert!(matches!(outcome, SubmissionOutcome::Unauthorized { .. }));
}

#[tokio::test]
async fn transport_failure_is_an_error_outcome_not_a_panic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let fx = fixture(&server.uri(), true);
    let outcome = fx.orchestrator.submit(&request("python")).await;
    match outcome {
        SubmissionOutcome::Error { message } => assert!(message.contains("502")),
        other => panic!("expected Error, got {other:?}"),
    }
}
