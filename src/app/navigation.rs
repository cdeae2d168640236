//! Navigation methods for the App.

use crate::state::{ChatState, GoalTreeState, LoginState, PreviewState, TaskState};

use super::App;

/// Screens reachable in the app.
///
/// Navigation is a stack: opening a screen pushes the previous one onto
/// [`App::back_stack`], Esc pops back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Google ID token entry
    Login,
    /// Dashboard with the day's tasks and active goals
    Home,
    /// Goal-building conversation with the agent
    Chat,
    /// Expanded goal with milestones and tasks
    GoalTree { goal_id: String },
    /// Read-only tree of a drafted goal from the chat
    Preview { preview_id: String },
    /// Single task with an edit form
    Task { task_id: String },
    /// Profile with name and weekly hours editing
    Profile,
}

impl App {
    fn push_route(&mut self, next: Route) {
        let prev = std::mem::replace(&mut self.route, next);
        self.back_stack.push(prev);
        self.mark_dirty();
    }

    /// Pop back to the previous screen, dropping the state of the one left.
    ///
    /// Landing back on the dashboard refreshes it so edits made on detail
    /// screens show up immediately.
    pub fn pop_route(&mut self) {
        let Some(prev) = self.back_stack.pop() else {
            return;
        };

        match self.route {
            Route::GoalTree { .. } => self.goal_tree = None,
            Route::Preview { .. } => self.preview = None,
            Route::Task { .. } => self.task = None,
            _ => {}
        }

        self.route = prev;
        self.mark_dirty();

        if self.route == Route::Home {
            self.refresh_home();
        }
    }

    /// Refresh the dashboard for the configured day.
    pub fn refresh_home(&mut self) {
        self.home.begin_refresh(self.config.dashboard_day());
        self.spawn_dashboard_load();
    }

    /// Open the goal-building chat, resolving the latest session on first
    /// entry. A session already in memory is shown as-is.
    pub fn open_chat(&mut self) {
        self.push_route(Route::Chat);
        if self.chat.needs_session() {
            self.chat.begin_session_load();
            self.spawn_chat_session_load();
        }
    }

    /// Open a goal from the dashboard and start assembling its tree.
    pub fn open_goal_tree(&mut self, goal_id: String) {
        self.goal_tree = Some(GoalTreeState::new(goal_id.clone()));
        self.push_route(Route::GoalTree {
            goal_id: goal_id.clone(),
        });
        self.spawn_goal_tree_load(goal_id);
    }

    /// Open the preview tree for a goal drafted in the chat.
    pub fn open_preview(&mut self, preview_id: String) {
        self.preview = Some(PreviewState::new(preview_id.clone()));
        self.push_route(Route::Preview {
            preview_id: preview_id.clone(),
        });
        self.spawn_preview_load(preview_id);
    }

    /// Open a task's detail screen and fetch it.
    pub fn open_task(&mut self, task_id: String) {
        self.task = Some(TaskState::new(task_id.clone()));
        self.push_route(Route::Task {
            task_id: task_id.clone(),
        });
        self.spawn_task_load(task_id);
    }

    /// Open the profile screen, refreshing it from the backend.
    pub fn open_profile(&mut self) {
        self.push_route(Route::Profile);
        self.profile.begin_load();
        self.spawn_profile_load();
    }

    /// Drop the stored token and return to the sign-in screen.
    pub fn sign_out(&mut self) {
        if let Some(manager) = &self.credentials {
            manager.clear();
        }
        self.session.sign_out();

        self.route = Route::Login;
        self.back_stack.clear();
        self.login = LoginState::new();
        self.chat = ChatState::new();
        self.goal_tree = None;
        self.preview = None;
        self.task = None;
        self.mark_dirty();
    }
}
