//! Prelude module for convenient imports.
//!
//! Re-exports the types most call sites need, so integration tests and the
//! binary can write `use stride::prelude::*;`.

// Core application types
pub use crate::app::{App, AppMessage, Route};

// API surface
pub use crate::api::{ApiClient, ApiError, HttpRepository, Repository};

// Model types
pub use crate::models::{
    ActiveGoal, AuthResponse, ChatMessage, ChatSender, GoalRow, Profile, TaskDetail, TaskGroup,
    TaskSummary, TreeNode,
};

// Session context
pub use crate::session::SessionHandle;

// Startup configuration
pub use crate::config::StartupConfig;

// UI entry point
pub use crate::ui::render;
