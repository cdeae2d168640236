//! Message handling for the App.

use tracing::{debug, warn};

use crate::auth::persist_login;

use super::{App, AppMessage, Route};

impl App {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::LoginSucceeded { auth } => {
                debug!(user_id = %auth.user.id, "signed in");
                persist_login(self.credentials.as_ref(), &auth.token, &auth.user.id);
                self.session.authenticate(auth.token, auth.user.clone());
                self.profile.apply_loaded(auth.user);

                self.login = crate::state::LoginState::new();
                self.route = Route::Home;
                self.back_stack.clear();
                self.refresh_home();
            }
            AppMessage::LoginFailed { error } => {
                self.login.apply_failed(error);
            }
            AppMessage::HomeLoaded {
                day,
                task_groups,
                goals,
            } => {
                self.home.apply_loaded(day, task_groups, goals);
            }
            AppMessage::HomeLoadFailed { day, error } => {
                self.home.apply_load_failed(day, error);
            }
            AppMessage::TaskToggleCommitted { task_id } => {
                debug!(%task_id, "task toggle committed");
                self.refresh_home();
            }
            AppMessage::TaskToggleFailed { task_id, error } => {
                // The optimistic mark stays; the next refresh reconciles it
                warn!(%task_id, "task toggle failed: {error}");
            }
            AppMessage::ChatSessionLoaded { session, messages } => {
                self.chat.apply_session_loaded(session, messages);
            }
            AppMessage::ChatSessionLoadFailed { error } => {
                self.chat.apply_session_failed(error);
            }
            AppMessage::ChatReplyReceived { response } => {
                self.chat.apply_reply(response);
            }
            AppMessage::ChatSendFailed { error } => {
                self.chat.apply_send_failed(error);
            }
            AppMessage::GoalTreeBuilt { goal_id, root } => {
                // Dropped when the screen was closed before the fetch finished
                if let Some(tree) = &mut self.goal_tree {
                    tree.apply_built(&goal_id, root);
                }
            }
            AppMessage::GoalTreeFailed { goal_id, error } => {
                if let Some(tree) = &mut self.goal_tree {
                    tree.apply_failed(&goal_id, error);
                }
            }
            AppMessage::PreviewBuilt { preview_id, root } => {
                if let Some(preview) = &mut self.preview {
                    preview.apply_built(&preview_id, root);
                }
            }
            AppMessage::PreviewFailed { preview_id, error } => {
                if let Some(preview) = &mut self.preview {
                    preview.apply_failed(&preview_id, error);
                }
            }
            AppMessage::TaskLoaded { task_id, task } => {
                if let Some(state) = &mut self.task {
                    state.apply_loaded(&task_id, task);
                }
            }
            AppMessage::TaskLoadFailed { task_id, error } => {
                if let Some(state) = &mut self.task {
                    state.apply_load_failed(&task_id, error);
                }
            }
            AppMessage::TaskUpdated { task_id, task } => {
                if let Some(state) = &mut self.task {
                    state.apply_updated(&task_id, task);
                }
            }
            AppMessage::TaskUpdateFailed { task_id, error } => {
                if let Some(state) = &mut self.task {
                    state.apply_update_failed(&task_id, error);
                }
            }
            AppMessage::ProfileLoaded { profile } => {
                self.session.set_profile(profile.clone());
                self.profile.apply_loaded(profile);
            }
            AppMessage::ProfileLoadFailed { error } => {
                self.profile.apply_load_failed(error);
            }
            AppMessage::ProfileSaved { profile } => {
                self.session.set_profile(profile.clone());
                self.profile.apply_saved(profile);
            }
            AppMessage::ProfileSaveFailed { error } => {
                self.profile.apply_save_failed(error);
            }
        }
    }
}
