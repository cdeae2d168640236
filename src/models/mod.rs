pub mod api;
pub mod chat;
pub mod home;
pub mod tree;

pub use api::*;
pub use chat::{map_history, ChatMessage, ChatSender, WELCOME_MESSAGE};
pub use home::{goal_progress, goal_rows, group_tasks, GoalRow, TaskGroup, TaskRow};
pub use tree::{capitalize, format_hours, format_number, join_details, TreeNode};
