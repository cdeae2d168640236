//! Wire types for the Stride backend.
//!
//! Everything here mirrors backend JSON one-to-one: camelCase fields,
//! `{data: ...}` envelopes, `{error: {code, message}}` failures. Unknown
//! fields are ignored; fields the backend may omit carry defaults.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// ============================================================================
// Envelopes
// ============================================================================

/// Single-object response envelope: `{"data": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiData<T> {
    pub data: T,
}

/// List response envelope: `{"data": [...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Error response envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Auth + profile
// ============================================================================

/// Payload of a successful `/v1/auth/google` exchange.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: Profile,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub available_hours_per_week: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Partial profile update, PATCHed to `/v1/me`. Unset fields stay untouched
/// server-side, so `None` fields are omitted from the body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_hours_per_week: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

// ============================================================================
// Goals, milestones, tasks
// ============================================================================

/// Goal as listed on the dashboard (`/v1/goals?status=active`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGoal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub priority: i32,
    /// Accent color as a packed ARGB value.
    #[serde(default)]
    pub color: i64,
    #[serde(default)]
    pub total_task_hours: f64,
    #[serde(default)]
    pub done_task_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub color: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub min_hours_per_week: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: String,
}

/// Milestone detail; `tasks` holds the ids of its tasks, which are fetched
/// individually when assembling a goal tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Task as listed by the day query. Completion may arrive as a `done` flag
/// or only as `status: "done"` depending on backend version.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    #[serde(default)]
    pub milestone_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl TaskSummary {
    /// Completion flag, preferring the explicit `done` field.
    pub fn is_done(&self) -> bool {
        self.done
            .unwrap_or_else(|| self.status.as_deref() == Some("done"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub id: String,
    #[serde(default)]
    pub milestone_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Partial task update, PATCHed to `/v1/tasks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TaskUpdate {
    /// Update that only flips the completion flag.
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }
}

// ============================================================================
// Goal-building chat session
// ============================================================================

/// Latest agent session as returned by `/v1/agent/goal/session:latest`.
///
/// `session_active` defaults to true when omitted; the backend only sends
/// `false` once the agent has finalized the conversation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub session_id: String,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub iteration: Option<i32>,
    #[serde(default)]
    pub goal_preview_id: Option<String>,
    #[serde(default = "default_true")]
    pub session_active: bool,
    #[serde(default)]
    pub context: Option<ChatContext>,
}

/// Planning context the backend attaches to a session and expects echoed
/// back with every message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_hours_left: Option<f64>,
    pub upcoming_tasks: Vec<UpcomingTask>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpcomingTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// One transcript line from the history endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub sender: String,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Payload of `/v1/agent/goal/session/{id}/history`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub entries: Vec<ChatEntry>,
}

/// Body POSTed to `/v1/agent/goal/session:message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub session_id: String,
    pub user_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    pub reply: String,
    #[serde(default)]
    pub action: Option<ChatAction>,
    #[serde(default)]
    pub state: Option<ChatSessionState>,
    #[serde(default)]
    pub context: Option<ChatContext>,
}

impl ChatMessageResponse {
    /// Goal-preview id this reply points at, wherever the backend put it.
    ///
    /// Checked in order: session state, embedded preview object, bare
    /// payload id. Returns `None` when the reply carries no draft.
    pub fn goal_preview_id(&self) -> Option<String> {
        if let Some(id) = self.state.as_ref().and_then(|s| s.goal_preview_id.clone()) {
            return Some(id);
        }
        let payload = self.action.as_ref()?.payload.as_ref()?;
        if let Some(id) = payload.goal_preview.as_ref().and_then(|p| p.id.clone()) {
            return Some(id);
        }
        payload.goal_preview_id.clone()
    }
}

/// Agent-side action attached to a reply (e.g. a produced goal draft).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<ChatActionPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatActionPayload {
    pub goal_preview: Option<GoalPreview>,
    pub goal_preview_id: Option<String>,
}

/// Session-state delta piggybacked on a message reply.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatSessionState {
    pub state: Option<String>,
    pub iteration: Option<i32>,
    pub session_active: Option<bool>,
    pub goal_preview_id: Option<String>,
}

// ============================================================================
// Goal preview (draft plan pending confirmation)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalPreview {
    pub id: Option<String>,
    pub goal: Option<PreviewGoal>,
    pub milestones: Vec<PreviewMilestone>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hours_per_week: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMilestone {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<PreviewTask>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTask {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}
