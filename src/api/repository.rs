//! Typed endpoint surface over the transport.
//!
//! One method per backend capability, each a pure pass-through: build the
//! path and body, delegate to [`ApiClient`], unwrap the `{data: ...}`
//! envelope. No caching and no de-duplication of in-flight calls. The trait
//! exists so screen logic can run against an in-memory fake in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use crate::models::{
    ActiveGoal, ApiData, ApiList, AuthResponse, ChatHistory, ChatMessageRequest,
    ChatMessageResponse, ChatSession, GoalDetail, GoalPreview, MilestoneDetail, MilestoneSummary,
    Profile, ProfileUpdate, TaskDetail, TaskSummary, TaskUpdate,
};

use super::client::ApiClient;
use super::error::ApiError;

#[async_trait]
pub trait Repository: Send + Sync {
    /// Exchange a Google ID token for a backend bearer token.
    async fn login_with_google(&self, id_token: &str) -> Result<AuthResponse, ApiError>;

    async fn fetch_profile(&self) -> Result<Profile, ApiError>;

    /// Dedicated PUT for the one profile field edited in-app.
    async fn update_available_hours(&self, hours: f64) -> Result<Profile, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError>;

    async fn fetch_tasks_for_day(&self, day: NaiveDate) -> Result<Vec<TaskSummary>, ApiError>;

    async fn fetch_active_goals(&self) -> Result<Vec<ActiveGoal>, ApiError>;

    async fn fetch_task_detail(&self, task_id: &str) -> Result<TaskDetail, ApiError>;

    async fn update_task(&self, task_id: &str, update: &TaskUpdate)
        -> Result<TaskDetail, ApiError>;

    async fn mark_task_done(&self, task_id: &str) -> Result<TaskDetail, ApiError>;

    async fn mark_task_undone(&self, task_id: &str) -> Result<TaskDetail, ApiError>;

    async fn fetch_goal_detail(&self, goal_id: &str) -> Result<GoalDetail, ApiError>;

    async fn fetch_goal_milestones(&self, goal_id: &str)
        -> Result<Vec<MilestoneSummary>, ApiError>;

    async fn fetch_milestone_detail(&self, milestone_id: &str)
        -> Result<MilestoneDetail, ApiError>;

    async fn fetch_latest_goal_session(&self) -> Result<ChatSession, ApiError>;

    async fn fetch_goal_session_history(&self, session_id: &str)
        -> Result<ChatHistory, ApiError>;

    async fn send_goal_session_message(
        &self,
        request: &ChatMessageRequest,
    ) -> Result<ChatMessageResponse, ApiError>;

    async fn fetch_goal_preview(&self, preview_id: &str) -> Result<GoalPreview, ApiError>;
}

/// The real repository, backed by the HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    api: ApiClient,
}

impl HttpRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Repository for HttpRepository {
    async fn login_with_google(&self, id_token: &str) -> Result<AuthResponse, ApiError> {
        self.api
            .post::<ApiData<AuthResponse>, _>("/v1/auth/google", &json!({ "idToken": id_token }))
            .await
            .map(|r| r.data)
    }

    async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.api
            .get::<ApiData<Profile>>("/v1/me")
            .await
            .map(|r| r.data)
    }

    async fn update_available_hours(&self, hours: f64) -> Result<Profile, ApiError> {
        self.api
            .put::<ApiData<Profile>, _>("/v1/me", &json!({ "availableHoursPerWeek": hours }))
            .await
            .map(|r| r.data)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.api
            .patch::<ApiData<Profile>, _>("/v1/me", update)
            .await
            .map(|r| r.data)
    }

    async fn fetch_tasks_for_day(&self, day: NaiveDate) -> Result<Vec<TaskSummary>, ApiError> {
        let path = format!("/v1/tasks:query?day={}", day.format("%Y-%m-%d"));
        self.api
            .get::<ApiList<TaskSummary>>(&path)
            .await
            .map(|r| r.data)
    }

    async fn fetch_active_goals(&self) -> Result<Vec<ActiveGoal>, ApiError> {
        self.api
            .get::<ApiList<ActiveGoal>>("/v1/goals?status=active")
            .await
            .map(|r| r.data)
    }

    async fn fetch_task_detail(&self, task_id: &str) -> Result<TaskDetail, ApiError> {
        self.api
            .get::<ApiData<TaskDetail>>(&format!("/v1/tasks/{}", task_id))
            .await
            .map(|r| r.data)
    }

    async fn update_task(
        &self,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<TaskDetail, ApiError> {
        self.api
            .patch::<ApiData<TaskDetail>, _>(&format!("/v1/tasks/{}", task_id), update)
            .await
            .map(|r| r.data)
    }

    async fn mark_task_done(&self, task_id: &str) -> Result<TaskDetail, ApiError> {
        self.api
            .post_empty::<ApiData<TaskDetail>>(&format!("/v1/tasks/{}/done", task_id))
            .await
            .map(|r| r.data)
    }

    async fn mark_task_undone(&self, task_id: &str) -> Result<TaskDetail, ApiError> {
        self.api
            .post_empty::<ApiData<TaskDetail>>(&format!("/v1/tasks/{}/undone", task_id))
            .await
            .map(|r| r.data)
    }

    async fn fetch_goal_detail(&self, goal_id: &str) -> Result<GoalDetail, ApiError> {
        self.api
            .get::<ApiData<GoalDetail>>(&format!("/v1/goals/{}", goal_id))
            .await
            .map(|r| r.data)
    }

    async fn fetch_goal_milestones(
        &self,
        goal_id: &str,
    ) -> Result<Vec<MilestoneSummary>, ApiError> {
        self.api
            .get::<ApiList<MilestoneSummary>>(&format!("/v1/goals/{}/milestones", goal_id))
            .await
            .map(|r| r.data)
    }

    async fn fetch_milestone_detail(
        &self,
        milestone_id: &str,
    ) -> Result<MilestoneDetail, ApiError> {
        self.api
            .get::<ApiData<MilestoneDetail>>(&format!("/v1/milestones/{}", milestone_id))
            .await
            .map(|r| r.data)
    }

    async fn fetch_latest_goal_session(&self) -> Result<ChatSession, ApiError> {
        self.api
            .get::<ApiData<ChatSession>>("/v1/agent/goal/session:latest")
            .await
            .map(|r| r.data)
    }

    async fn fetch_goal_session_history(
        &self,
        session_id: &str,
    ) -> Result<ChatHistory, ApiError> {
        self.api
            .get::<ApiData<ChatHistory>>(&format!("/v1/agent/goal/session/{}/history", session_id))
            .await
            .map(|r| r.data)
    }

    async fn send_goal_session_message(
        &self,
        request: &ChatMessageRequest,
    ) -> Result<ChatMessageResponse, ApiError> {
        self.api
            .post::<ApiData<ChatMessageResponse>, _>("/v1/agent/goal/session:message", request)
            .await
            .map(|r| r.data)
    }

    async fn fetch_goal_preview(&self, preview_id: &str) -> Result<GoalPreview, ApiError> {
        self.api
            .get::<ApiData<GoalPreview>>(&format!("/v1/goal-previews/{}", preview_id))
            .await
            .map(|r| r.data)
    }
}
