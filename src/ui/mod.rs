//! Terminal UI rendering.
//!
//! Every screen draws from the shared [`App`] state; [`render`] picks the
//! screen that matches the active route. Screens never mutate state, all
//! updates flow through key handling and [`crate::app::AppMessage`].

pub mod chat;
pub mod goal_tree;
pub mod helpers;
pub mod home;
pub mod login;
pub mod preview;
pub mod profile;
pub mod task;
pub mod theme;
pub mod tree;

use ratatui::Frame;

use crate::app::{App, Route};

/// Render the screen for the active route.
pub fn render(frame: &mut Frame, app: &App) {
    match app.route {
        Route::Login => login::render_login_screen(frame, app),
        Route::Home => home::render_home_screen(frame, app),
        Route::Chat => chat::render_chat_screen(frame, app),
        Route::GoalTree { .. } => goal_tree::render_goal_tree_screen(frame, app),
        Route::Preview { .. } => preview::render_preview_screen(frame, app),
        Route::Task { .. } => task::render_task_screen(frame, app),
        Route::Profile => profile::render_profile_screen(frame, app),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::offline_app;
    use crate::auth::PreflightOutcome;
    use crate::models::{
        ChatMessage, ChatSender, GoalRow, Profile, TaskDetail, TaskGroup, TaskRow, TreeNode,
    };
    use crate::state::{GoalTreeState, PreviewState, TaskState};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_login_screen_prompts_for_a_token() {
        let app = offline_app(PreflightOutcome::NeedsLogin { notice: None });

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("Sign in"));
        assert!(buffer_str.contains("Paste a Google ID token"));
    }

    #[test]
    fn test_login_screen_shows_preflight_notice() {
        let app = offline_app(PreflightOutcome::NeedsLogin {
            notice: Some("Your session expired. Sign in again.".to_string()),
        });

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("Your session expired"));
    }

    #[test]
    fn test_home_screen_lists_tasks_and_goals() {
        let mut app = offline_app(PreflightOutcome::Ready);
        let day = app.home.day;
        app.home.apply_loaded(
            day,
            vec![TaskGroup {
                label: day.to_string(),
                tasks: vec![TaskRow {
                    id: "t1".to_string(),
                    title: "Write the outline".to_string(),
                    date: day.to_string(),
                    done: false,
                }],
            }],
            vec![GoalRow {
                id: "g1".to_string(),
                title: "Learn the piano".to_string(),
                priority: 1,
                progress: 0.5,
                color: 0xFF336699,
            }],
        );

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("Plan for"));
        assert!(buffer_str.contains("Write the outline"));
        assert!(buffer_str.contains("Learn the piano"));
        assert!(buffer_str.contains("TASKS"));
        assert!(buffer_str.contains("GOALS"));
    }

    #[test]
    fn test_home_screen_empty_day_message() {
        let mut app = offline_app(PreflightOutcome::Ready);
        let day = app.home.day;
        app.home.apply_loaded(day, vec![], vec![]);

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("Nothing scheduled for this day."));
    }

    #[test]
    fn test_chat_screen_shows_transcript() {
        let mut app = offline_app(PreflightOutcome::Ready);
        app.route = Route::Chat;
        app.chat.messages.push(ChatMessage::welcome());
        app.chat.messages.push(ChatMessage {
            id: "m1".to_string(),
            sender: ChatSender::User,
            text: "I want to run a marathon".to_string(),
        });

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("GOAL PLANNER"));
        assert!(buffer_str.contains("I want to run a marathon"));
    }

    #[test]
    fn test_goal_tree_screen_shows_outline() {
        let mut app = offline_app(PreflightOutcome::Ready);
        app.route = Route::GoalTree {
            goal_id: "g1".to_string(),
        };
        let mut state = GoalTreeState::new("g1");
        state.apply_built(
            "g1",
            TreeNode::new(
                "g1",
                "Ship the rewrite",
                Some("2 milestones".to_string()),
                vec![TreeNode::new(
                    "m1",
                    "Port the parser",
                    None,
                    vec![TreeNode::leaf("t1", "Write the lexer", None)],
                )],
            ),
        );
        app.goal_tree = Some(state);

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("Ship the rewrite"));
        assert!(buffer_str.contains("Port the parser"));
        assert!(buffer_str.contains("Write the lexer"));
    }

    #[test]
    fn test_task_screen_shows_details() {
        let mut app = offline_app(PreflightOutcome::Ready);
        app.route = Route::Task {
            task_id: "t1".to_string(),
        };
        let mut state = TaskState::new("t1");
        state.apply_loaded(
            "t1",
            TaskDetail {
                id: "t1".to_string(),
                milestone_id: Some("m1".to_string()),
                title: "Write the lexer".to_string(),
                description: Some("Token definitions first.".to_string()),
                date: "2025-03-10".to_string(),
                estimated_hours: 2.5,
                done: false,
                created_at: None,
                updated_at: None,
            },
        );
        app.task = Some(state);

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("Write the lexer"));
        assert!(buffer_str.contains("Token definitions first."));
        assert!(buffer_str.contains("2.5 h"));
    }

    #[test]
    fn test_profile_screen_shows_account() {
        let mut app = offline_app(PreflightOutcome::Ready);
        app.route = Route::Profile;
        app.profile.apply_loaded(Profile {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            profile_image_url: None,
            timezone: None,
            available_hours_per_week: 12.0,
            created_at: None,
            updated_at: None,
        });

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("PROFILE"));
        assert!(buffer_str.contains("Ada"));
        assert!(buffer_str.contains("ada@example.com"));
        assert!(buffer_str.contains("12 h"));
    }

    #[test]
    fn test_preview_screen_shows_proposed_plan() {
        let mut app = offline_app(PreflightOutcome::Ready);
        app.route = Route::Preview {
            preview_id: "p1".to_string(),
        };
        let mut state = PreviewState::new("p1");
        state.apply_built(
            "p1",
            TreeNode::new(
                "p1",
                "Run a marathon",
                Some("3 milestones".to_string()),
                vec![TreeNode::leaf("pm1", "Base mileage", None)],
            ),
        );
        app.preview = Some(state);

        let buffer_str = draw(&app);

        assert!(buffer_str.contains("PROPOSED PLAN"));
        assert!(buffer_str.contains("Run a marathon"));
        assert!(buffer_str.contains("Base mileage"));
    }
}
