//! Integration tests for draft plan previews against a mock backend.
//!
//! A preview is the agent's proposed goal before the user confirms it in
//! the mobile app. These tests verify:
//! - The fetched draft is shaped into the same outline as a live goal
//! - A draft without a goal section is rejected with a readable message
//! - Backend errors surface verbatim

use stride::api::{ApiClient, HttpRepository};
use stride::session::SessionHandle;
use stride::state::load_preview;
use stride::state::preview::MISSING_GOAL_ERROR;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_repo(server: &MockServer) -> HttpRepository {
    let session = SessionHandle::new();
    HttpRepository::new(ApiClient::with_base_url(server.uri(), session))
}

#[tokio::test]
async fn test_preview_shapes_draft_outline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/goal-previews/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "id": "p1",
                "goal": {
                    "title": "Run a marathon",
                    "description": "Spring race",
                    "hoursPerWeek": 6.0
                },
                "milestones": [{
                    "title": "Base mileage",
                    "description": "Build the aerobic base",
                    "tasks": [
                        {"title": "Easy run", "date": "2025-03-03", "estimatedHours": 1.0},
                        {"title": "Long run", "date": "2025-03-08", "estimatedHours": 2.5}
                    ]
                }]
            }
        })))
        .mount(&mock_server)
        .await;

    let repo = test_repo(&mock_server);
    let root = load_preview(&repo, "p1").await.unwrap();

    assert_eq!(root.title, "Run a marathon");
    assert_eq!(
        root.subtitle.as_deref(),
        Some("Spring race \u{2022} 6 h/week")
    );
    assert_eq!(root.children.len(), 1);

    let milestone = &root.children[0];
    assert_eq!(milestone.title, "Base mileage");
    assert_eq!(milestone.children.len(), 2);
    assert_eq!(
        milestone.children[0].subtitle.as_deref(),
        Some("2025-03-03 \u{2022} 1h")
    );
}

#[tokio::test]
async fn test_preview_without_goal_reports_missing_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/goal-previews/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"id": "p1", "milestones": []}
        })))
        .mount(&mock_server)
        .await;

    let repo = test_repo(&mock_server);
    let err = load_preview(&repo, "p1").await.unwrap_err();

    assert_eq!(err, MISSING_GOAL_ERROR);
}

#[tokio::test]
async fn test_preview_fetch_failure_surfaces_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/goal-previews/p1"))
        .respond_with(ResponseTemplate::new(410).set_body_json(serde_json::json!({
            "error": {"code": "gone", "message": "This draft has expired"}
        })))
        .mount(&mock_server)
        .await;

    let repo = test_repo(&mock_server);
    let err = load_preview(&repo, "p1").await.unwrap_err();

    assert_eq!(err, "This draft has expired");
}
