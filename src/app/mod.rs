//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Route`] - Stack-based navigation between screens
//! - [`AppMessage`] - Messages for async communication

mod handlers;
mod loaders;
mod messages;
mod navigation;

pub use messages::AppMessage;
pub use navigation::Route;

#[cfg(test)]
pub(crate) use tests::offline_app;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::Repository;
use crate::auth::{CredentialsManager, PreflightOutcome};
use crate::config::StartupConfig;
use crate::session::SessionHandle;
use crate::state::{
    ChatState, GoalTreeState, HomeState, LoginState, PreviewState, ProfileState, TaskState,
};

/// Main application state
pub struct App {
    /// Authenticated session shared with spawned API tasks
    pub session: SessionHandle,
    /// API repository (shared across async tasks)
    pub repo: Arc<dyn Repository>,
    /// Startup configuration (api url overrides, pinned dashboard day)
    pub config: StartupConfig,
    /// Credential store; None when no home directory is available
    pub credentials: Option<CredentialsManager>,
    /// The visible screen
    pub route: Route,
    /// Screens beneath the visible one; Esc pops back through these
    pub back_stack: Vec<Route>,
    /// Sign-in screen state
    pub login: LoginState,
    /// Dashboard state (kept alive across navigation)
    pub home: HomeState,
    /// Goal-building chat state (kept alive across navigation)
    pub chat: ChatState,
    /// Tree state for the goal being inspected, None outside that screen
    pub goal_tree: Option<GoalTreeState>,
    /// Tree state for a goal preview, None outside that screen
    pub preview: Option<PreviewState>,
    /// Detail state for the task being inspected, None outside that screen
    pub task: Option<TaskState>,
    /// Profile screen state
    pub profile: ProfileState,
    /// Receiver for async messages (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Dirty flag: when true, the UI needs to be redrawn.
    /// Set on state mutations, cleared after each draw.
    pub needs_redraw: bool,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Tick counter for animations (spinner, undo countdown)
    pub tick_count: u64,
}

impl App {
    /// Create the app from the pre-flight session check.
    ///
    /// Starts on the dashboard when a stored token resolved to a profile,
    /// otherwise on the sign-in screen with an optional notice.
    pub fn new(
        repo: Arc<dyn Repository>,
        session: SessionHandle,
        config: StartupConfig,
        credentials: Option<CredentialsManager>,
        outcome: PreflightOutcome,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let day = config.dashboard_day();

        let (route, login) = match outcome {
            PreflightOutcome::Ready => (Route::Home, LoginState::new()),
            PreflightOutcome::NeedsLogin { notice } => {
                (Route::Login, LoginState::with_notice(notice))
            }
        };

        Self {
            session,
            repo,
            config,
            credentials,
            route,
            back_stack: Vec::new(),
            login,
            home: HomeState::new(day),
            chat: ChatState::new(),
            goal_tree: None,
            preview: None,
            task: None,
            profile: ProfileState::new(),
            message_rx: Some(message_rx),
            message_tx,
            needs_redraw: true, // Start with redraw needed
            should_quit: false,
            tick_count: 0,
        }
    }

    /// Kick off the initial fetches. Must run inside a Tokio runtime.
    pub fn initialize(&mut self) {
        if self.session.is_signed_in() {
            self.spawn_dashboard_load();
            self.spawn_profile_load();
        }
    }

    /// Mark the UI as needing a redraw
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance the tick counter and the undo countdown.
    ///
    /// When the undo window runs out the pending toggle is committed to the
    /// backend in the background.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self.home.pending_toggle.is_some() {
            self.mark_dirty();
            if let Some(toggle) = self.home.tick() {
                self.spawn_toggle_commit(toggle);
            }
        }
    }

    /// True while any fetch or save is in flight.
    ///
    /// The event loop keeps drawing every tick while this holds so spinner
    /// frames stay animated.
    pub fn is_busy(&self) -> bool {
        self.login.is_loading
            || self.home.is_loading
            || self.chat.is_loading
            || self.chat.is_sending
            || self.goal_tree.as_ref().is_some_and(|t| t.is_loading)
            || self.preview.as_ref().is_some_and(|p| p.is_loading)
            || self
                .task
                .as_ref()
                .is_some_and(|t| t.is_loading || t.is_saving)
            || self.profile.is_loading
            || self.profile.is_saving
    }

    /// Mark the app to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
