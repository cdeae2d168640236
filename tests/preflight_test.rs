//! Integration tests for the startup auth preflight against a mock backend.
//!
//! The preflight runs before the terminal enters raw mode and decides
//! between dashboard and sign-in screen. These tests verify:
//! - A supplied Google ID token is exchanged and installs a session
//! - A rejected ID token lands on the login screen with the backend's reason
//! - With nothing stored, no network call is made at all

use stride::api::{ApiClient, HttpRepository};
use stride::auth::{resolve_session, PreflightOutcome};
use stride::config::StartupConfig;
use stride::session::SessionHandle;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_repo(server: &MockServer) -> (HttpRepository, SessionHandle) {
    let session = SessionHandle::new();
    let api = ApiClient::with_base_url(server.uri(), session.clone());
    (HttpRepository::new(api), session)
}

#[tokio::test]
async fn test_supplied_id_token_installs_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/google"))
        .and(body_json(serde_json::json!({"idToken": "fresh-google-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "token": "backend-token",
                "user": {
                    "id": "user-1",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "availableHoursPerWeek": 10.0
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let (repo, session) = test_repo(&mock_server);
    let config = StartupConfig::new()
        .with_api_url(mock_server.uri())
        .with_id_token("fresh-google-token");

    let outcome = resolve_session(&repo, &session, None, &config).await;

    assert_eq!(outcome, PreflightOutcome::Ready);
    assert!(session.is_signed_in());
    assert_eq!(session.token().as_deref(), Some("backend-token"));
    assert_eq!(session.user_id().as_deref(), Some("user-1"));
}

#[tokio::test]
async fn test_rejected_id_token_reports_backend_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/google"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": "invalid_token", "message": "Google token expired"}
        })))
        .mount(&mock_server)
        .await;

    let (repo, session) = test_repo(&mock_server);
    let config = StartupConfig::new()
        .with_api_url(mock_server.uri())
        .with_id_token("stale-google-token");

    let outcome = resolve_session(&repo, &session, None, &config).await;

    assert_eq!(
        outcome,
        PreflightOutcome::NeedsLogin {
            notice: Some("Google token expired".to_string())
        }
    );
    assert!(!session.is_signed_in());
}

#[tokio::test]
async fn test_without_stored_credentials_no_request_is_made() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (repo, session) = test_repo(&mock_server);
    let config = StartupConfig::new().with_api_url(mock_server.uri());

    let outcome = resolve_session(&repo, &session, None, &config).await;

    assert_eq!(outcome, PreflightOutcome::NeedsLogin { notice: None });
    assert!(session.token().is_none());
}
