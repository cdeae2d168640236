//! Background fetches and saves.
//!
//! Every method here clones the repository handle and the message sender,
//! spawns the call onto the runtime, and reports the outcome back through
//! an [`AppMessage`]. Nothing in this file touches app state directly.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{ChatMessageRequest, TaskUpdate};
use crate::state::{self, PendingToggle, ProfileSave};

use super::{App, AppMessage};

impl App {
    /// Exchange a Google ID token for a backend session.
    pub fn spawn_login(&self, id_token: String) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            debug!("exchanging id token for a session");
            let msg = match repo.login_with_google(&id_token).await {
                Ok(auth) => AppMessage::LoginSucceeded { auth },
                Err(e) => {
                    warn!("login failed: {}", e.message());
                    AppMessage::LoginFailed { error: e.message() }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Fetch the day's tasks and the active goals in parallel.
    pub fn spawn_dashboard_load(&self) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        let day = self.home.day;
        tokio::spawn(async move {
            let msg = match state::load_dashboard(repo.as_ref(), day).await {
                Ok((task_groups, goals)) => AppMessage::HomeLoaded {
                    day,
                    task_groups,
                    goals,
                },
                Err(error) => AppMessage::HomeLoadFailed { day, error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Commit a completion toggle whose undo window has closed.
    pub fn spawn_toggle_commit(&self, toggle: PendingToggle) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            debug!(task_id = %toggle.task_id, done = toggle.done, "committing task toggle");
            let update = TaskUpdate::done(toggle.done);
            let msg = match repo.update_task(&toggle.task_id, &update).await {
                Ok(_) => AppMessage::TaskToggleCommitted {
                    task_id: toggle.task_id,
                },
                Err(e) => {
                    warn!("task toggle failed: {}", e.message());
                    AppMessage::TaskToggleFailed {
                        task_id: toggle.task_id,
                        error: e.message(),
                    }
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Resolve the latest goal-building session, with history when active.
    pub fn spawn_chat_session_load(&self) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match state::load_latest_session(repo.as_ref()).await {
                Ok((session, messages)) => AppMessage::ChatSessionLoaded { session, messages },
                Err(error) => AppMessage::ChatSessionLoadFailed { error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Send a chat message the compose reducer already queued.
    pub fn spawn_chat_send(&self, request: ChatMessageRequest) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match repo.send_goal_session_message(&request).await {
                Ok(response) => AppMessage::ChatReplyReceived { response },
                Err(e) => AppMessage::ChatSendFailed { error: e.message() },
            };
            let _ = tx.send(msg);
        });
    }

    /// Assemble the full tree for a goal.
    pub fn spawn_goal_tree_load(&self, goal_id: String) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match state::build_goal_tree(repo.as_ref(), &goal_id).await {
                Ok(root) => AppMessage::GoalTreeBuilt { goal_id, root },
                Err(error) => AppMessage::GoalTreeFailed { goal_id, error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Fetch and shape a goal preview.
    pub fn spawn_preview_load(&self, preview_id: String) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match state::load_preview(repo.as_ref(), &preview_id).await {
                Ok(root) => AppMessage::PreviewBuilt { preview_id, root },
                Err(error) => AppMessage::PreviewFailed { preview_id, error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Fetch one task's detail.
    pub fn spawn_task_load(&self, task_id: String) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match state::load_task(repo.as_ref(), &task_id).await {
                Ok(task) => AppMessage::TaskLoaded { task_id, task },
                Err(error) => AppMessage::TaskLoadFailed { task_id, error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Push a task edit (or detail-screen done flip) to the backend.
    pub fn spawn_task_update(&self, task_id: String, update: TaskUpdate) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match repo.update_task(&task_id, &update).await {
                Ok(task) => AppMessage::TaskUpdated { task_id, task },
                Err(e) => AppMessage::TaskUpdateFailed {
                    task_id,
                    error: e.message(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Fetch the signed-in user's profile.
    pub fn spawn_profile_load(&self) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match state::load_profile(repo.as_ref()).await {
                Ok(profile) => AppMessage::ProfileLoaded { profile },
                Err(error) => AppMessage::ProfileLoadFailed { error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Persist a profile edit. Weekly hours go through the dedicated
    /// endpoint, everything else through the generic profile patch.
    pub fn spawn_profile_save(&self, save: ProfileSave) {
        let repo = Arc::clone(&self.repo);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = match save {
                ProfileSave::Hours(hours) => repo.update_available_hours(hours).await,
                ProfileSave::Update(update) => repo.update_profile(&update).await,
            };
            let msg = match result {
                Ok(profile) => AppMessage::ProfileSaved { profile },
                Err(e) => AppMessage::ProfileSaveFailed { error: e.message() },
            };
            let _ = tx.send(msg);
        });
    }
}
