//! Per-screen state containers.
//!
//! Each screen owns one state struct plus the async loaders that feed it.
//! Loaders are plain functions over the repository trait; the app spawns
//! them and routes their results back through [`crate::app::AppMessage`],
//! so state is only ever mutated on the event-loop thread.

pub mod chat;
pub mod goal_tree;
pub mod home;
pub mod login;
pub mod preview;
pub mod profile;
pub mod task;

pub use chat::{load_latest_session, ChatState, SendOutcome};
pub use goal_tree::{build_goal_tree, GoalTreeState};
pub use home::{load_dashboard, HomeFocus, HomeState, PendingToggle, UNDO_WINDOW_TICKS};
pub use login::LoginState;
pub use preview::{load_preview, PreviewState};
pub use profile::{load_profile, ProfileField, ProfileSave, ProfileState};
pub use task::{load_task, TaskEdit, TaskField, TaskState};
