//! AppMessage enum for async communication within the application.

use chrono::NaiveDate;

use crate::models::{
    AuthResponse, ChatMessage, ChatMessageResponse, ChatSession, GoalRow, Profile, TaskDetail,
    TaskGroup, TreeNode,
};

/// Messages received from async operations (API fetches, saves, auth).
///
/// Every network call runs on a spawned task and reports back through one
/// of these variants; the event loop applies them on the main thread.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Login exchange completed successfully
    LoginSucceeded { auth: AuthResponse },
    /// Login exchange was rejected or failed
    LoginFailed { error: String },
    /// Dashboard data (tasks + goals) loaded for a day
    HomeLoaded {
        day: NaiveDate,
        task_groups: Vec<TaskGroup>,
        goals: Vec<GoalRow>,
    },
    /// Dashboard refresh failed; previous data stays on screen
    HomeLoadFailed { day: NaiveDate, error: String },
    /// A done/undone toggle was committed on the backend
    TaskToggleCommitted { task_id: String },
    /// A done/undone toggle failed to commit
    TaskToggleFailed { task_id: String, error: String },
    /// Latest goal-building session resolved (with history when active)
    ChatSessionLoaded {
        session: ChatSession,
        messages: Vec<ChatMessage>,
    },
    /// Session or history fetch failed
    ChatSessionLoadFailed { error: String },
    /// Agent replied to a sent chat message
    ChatReplyReceived { response: ChatMessageResponse },
    /// Sending a chat message failed
    ChatSendFailed { error: String },
    /// Full goal tree (goal, milestones, tasks) assembled
    GoalTreeBuilt { goal_id: String, root: TreeNode },
    /// Goal tree assembly failed at some level
    GoalTreeFailed { goal_id: String, error: String },
    /// Goal preview tree assembled
    PreviewBuilt { preview_id: String, root: TreeNode },
    /// Goal preview fetch failed
    PreviewFailed { preview_id: String, error: String },
    /// Task detail loaded
    TaskLoaded { task_id: String, task: TaskDetail },
    /// Task detail fetch failed
    TaskLoadFailed { task_id: String, error: String },
    /// Task update (edit form or done toggle) was accepted
    TaskUpdated { task_id: String, task: TaskDetail },
    /// Task update was rejected
    TaskUpdateFailed { task_id: String, error: String },
    /// Profile loaded
    ProfileLoaded { profile: Profile },
    /// Profile fetch failed
    ProfileLoadFailed { error: String },
    /// Profile edit was accepted
    ProfileSaved { profile: Profile },
    /// Profile edit was rejected
    ProfileSaveFailed { error: String },
}
