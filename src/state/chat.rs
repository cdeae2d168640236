//! Goal-building chat state.
//!
//! The conversation is a server-side session. Locally this moves between
//! "no session", "loading", "active", "error", and "finalized" (the backend
//! flips `sessionActive` off once the agent has produced a final plan).
//! Finalized sessions keep the transcript read-only and expose the goal
//! preview for browsing.

use crate::api::Repository;
use crate::models::{
    map_history, ChatContext, ChatMessage, ChatMessageRequest, ChatMessageResponse, ChatSession,
};
use crate::widgets::TextField;

/// What a send attempt should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Post this request; the user line is already appended locally.
    Request(ChatMessageRequest),
    /// No session is known yet; run the session load first.
    NeedsSession,
    /// Nothing to do (blank input, send already in flight, or a local error
    /// was set).
    NoOp,
}

#[derive(Debug, Clone)]
pub struct ChatState {
    pub is_loading: bool,
    pub is_sending: bool,
    pub session_id: Option<String>,
    pub goal_preview_id: Option<String>,
    pub session_active: bool,
    pub messages: Vec<ChatMessage>,
    pub error: Option<String>,
    pub input: TextField,
    /// Transcript lines scrolled up from the latest message; 0 sticks the
    /// view to the bottom.
    pub scroll_from_bottom: u16,
    context: Option<ChatContext>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            is_loading: false,
            is_sending: false,
            session_id: None,
            goal_preview_id: None,
            session_active: true,
            messages: Vec::new(),
            error: None,
            input: TextField::new(),
            scroll_from_bottom: 0,
            context: None,
        }
    }

    /// True when entering the screen should kick off a session load. A known
    /// session or a load already in flight makes this a no-op.
    pub fn needs_session(&self) -> bool {
        self.session_id.is_none() && !self.is_loading
    }

    pub fn begin_session_load(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn apply_session_loaded(&mut self, session: ChatSession, messages: Vec<ChatMessage>) {
        self.is_loading = false;
        self.is_sending = false;
        self.session_id = Some(session.session_id);
        self.goal_preview_id = session.goal_preview_id;
        self.session_active = session.session_active;
        self.context = session.context;
        self.messages = messages;
        self.error = None;
        self.scroll_from_bottom = 0;
    }

    /// A failed load resets the whole screen, forgotten session included, so
    /// retry starts from a clean slate.
    pub fn apply_session_failed(&mut self, error: String) {
        let input = std::mem::take(&mut self.input);
        *self = Self::new();
        self.input = input;
        self.error = Some(error);
    }

    /// Validate and stage a send from the composer.
    ///
    /// On the request path the user's line is appended optimistically, the
    /// composer is cleared, and the staged request echoes the session
    /// context the backend last sent.
    pub fn prepare_send(&mut self, user_id: Option<String>) -> SendOutcome {
        let trimmed = self.input.content().trim().to_string();
        if trimmed.is_empty() || self.is_sending {
            return SendOutcome::NoOp;
        }
        let session_id = match &self.session_id {
            Some(id) => id.clone(),
            None => return SendOutcome::NeedsSession,
        };
        let user_id = match user_id {
            Some(id) => id,
            None => {
                self.error = Some("Profile not loaded yet".to_string());
                return SendOutcome::NoOp;
            }
        };

        self.messages.push(ChatMessage::user(trimmed.clone()));
        self.error = None;
        self.is_sending = true;
        self.scroll_from_bottom = 0;
        self.input.clear();

        SendOutcome::Request(ChatMessageRequest {
            session_id,
            user_id,
            message: trimmed,
            context: self.context.clone(),
        })
    }

    pub fn apply_reply(&mut self, response: ChatMessageResponse) {
        self.is_sending = false;
        if let Some(context) = response.context.clone() {
            self.context = Some(context);
        }
        self.messages.push(ChatMessage::agent(response.reply.clone()));
        if let Some(preview_id) = response.goal_preview_id() {
            self.goal_preview_id = Some(preview_id);
        }
        if let Some(active) = response.state.as_ref().and_then(|s| s.session_active) {
            self.session_active = active;
        }
        self.scroll_from_bottom = 0;
    }

    /// The optimistic user line stays in the transcript; the error banner
    /// and the retry key make the failed send visible.
    pub fn apply_send_failed(&mut self, error: String) {
        self.is_sending = false;
        self.error = Some(error);
    }

    /// Finalized conversation: the agent closed the session, usually after
    /// producing a goal preview.
    pub fn is_finalized(&self) -> bool {
        !self.session_active
    }

    pub fn can_compose(&self) -> bool {
        self.session_active && !self.is_sending
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }
}

/// Fetch the latest session and, when it is still active, its transcript.
///
/// Inactive (finalized) sessions skip the history call entirely and seed the
/// welcome line. A history failure fails the whole load.
pub async fn load_latest_session(
    repo: &dyn Repository,
) -> Result<(ChatSession, Vec<ChatMessage>), String> {
    let session = repo
        .fetch_latest_goal_session()
        .await
        .map_err(|e| e.message())?;

    let messages = if session.session_active {
        let history = repo
            .fetch_goal_session_history(&session.session_id)
            .await
            .map_err(|e| e.message())?;
        map_history(&history.entries)
    } else {
        map_history(&[])
    };

    Ok((session, messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatSender, ChatSessionState, WELCOME_MESSAGE};

    fn session(id: &str, active: bool) -> ChatSession {
        ChatSession {
            session_id: id.to_string(),
            chat_id: None,
            state: None,
            iteration: None,
            goal_preview_id: None,
            session_active: active,
            context: None,
        }
    }

    fn reply(text: &str) -> ChatMessageResponse {
        ChatMessageResponse {
            session_id: None,
            reply: text.to_string(),
            action: None,
            state: None,
            context: None,
        }
    }

    fn active_state() -> ChatState {
        let mut state = ChatState::new();
        state.apply_session_loaded(session("s-1", true), vec![ChatMessage::welcome()]);
        state
    }

    // -------------------- Session load --------------------

    #[test]
    fn test_needs_session_only_when_idle_and_unknown() {
        let mut state = ChatState::new();
        assert!(state.needs_session());
        state.begin_session_load();
        assert!(!state.needs_session());

        let mut loaded = active_state();
        assert!(!loaded.needs_session());
        loaded.is_loading = false;
        assert_eq!(loaded.session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn test_session_loaded_populates_state() {
        let mut state = ChatState::new();
        state.begin_session_load();
        let mut s = session("s-9", false);
        s.goal_preview_id = Some("gp-1".to_string());
        state.apply_session_loaded(s, vec![ChatMessage::welcome()]);

        assert!(!state.is_loading);
        assert_eq!(state.session_id.as_deref(), Some("s-9"));
        assert_eq!(state.goal_preview_id.as_deref(), Some("gp-1"));
        assert!(state.is_finalized());
        assert_eq!(state.messages[0].text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_session_failed_resets_everything() {
        let mut state = active_state();
        state.input.insert_char('x');
        state.apply_session_failed("backend down".to_string());

        assert_eq!(state.error.as_deref(), Some("backend down"));
        assert!(state.session_id.is_none());
        assert!(state.messages.is_empty());
        // The draft the user was typing survives the reset.
        assert_eq!(state.input.content(), "x");
    }

    // -------------------- Sending --------------------

    #[test]
    fn test_blank_input_is_a_no_op() {
        let mut state = active_state();
        state.input.insert_str("   ");
        let before = state.messages.clone();

        let outcome = state.prepare_send(Some("u-1".to_string()));

        assert_eq!(outcome, SendOutcome::NoOp);
        assert_eq!(state.messages, before);
        assert!(!state.is_sending);
    }

    #[test]
    fn test_send_without_session_requests_load() {
        let mut state = ChatState::new();
        state.input.insert_str("hello");
        assert_eq!(
            state.prepare_send(Some("u-1".to_string())),
            SendOutcome::NeedsSession
        );
        // Input is kept so the message goes out once the session exists.
        assert_eq!(state.input.content(), "hello");
    }

    #[test]
    fn test_send_without_user_id_sets_error() {
        let mut state = active_state();
        state.input.insert_str("hello");
        assert_eq!(state.prepare_send(None), SendOutcome::NoOp);
        assert_eq!(state.error.as_deref(), Some("Profile not loaded yet"));
    }

    #[test]
    fn test_send_appends_optimistically_and_builds_request() {
        let mut state = active_state();
        state.input.insert_str("  plan a garden  ");

        let outcome = state.prepare_send(Some("u-1".to_string()));
        let request = match outcome {
            SendOutcome::Request(request) => request,
            other => panic!("expected request, got {:?}", other),
        };

        assert_eq!(request.session_id, "s-1");
        assert_eq!(request.user_id, "u-1");
        assert_eq!(request.message, "plan a garden");
        let last = state.messages.last().unwrap();
        assert_eq!(last.sender, ChatSender::User);
        assert_eq!(last.text, "plan a garden");
        assert!(state.is_sending);
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_send_locked_while_in_flight() {
        let mut state = active_state();
        state.input.insert_str("first");
        state.prepare_send(Some("u-1".to_string()));
        state.input.insert_str("second");
        assert_eq!(
            state.prepare_send(Some("u-1".to_string())),
            SendOutcome::NoOp
        );
    }

    #[test]
    fn test_reply_appends_agent_and_updates_session_flags() {
        let mut state = active_state();
        state.is_sending = true;

        let mut response = reply("Here is your plan");
        response.state = Some(ChatSessionState {
            state: None,
            iteration: None,
            session_active: Some(false),
            goal_preview_id: Some("gp-7".to_string()),
        });
        state.apply_reply(response);

        assert!(!state.is_sending);
        assert_eq!(state.messages.last().unwrap().sender, ChatSender::Agent);
        assert_eq!(state.goal_preview_id.as_deref(), Some("gp-7"));
        assert!(state.is_finalized());
    }

    #[test]
    fn test_reply_without_preview_keeps_previous_id() {
        let mut state = active_state();
        state.goal_preview_id = Some("gp-old".to_string());
        state.apply_reply(reply("Tell me more"));
        assert_eq!(state.goal_preview_id.as_deref(), Some("gp-old"));
        assert!(state.session_active);
    }

    #[test]
    fn test_send_failure_keeps_optimistic_line() {
        let mut state = active_state();
        state.input.insert_str("keep me");
        state.prepare_send(Some("u-1".to_string()));

        state.apply_send_failed("timeout".to_string());

        assert_eq!(state.error.as_deref(), Some("timeout"));
        assert_eq!(state.messages.last().unwrap().text, "keep me");
        assert!(!state.is_sending);
    }

    #[test]
    fn test_finalized_session_locks_composer() {
        let mut state = ChatState::new();
        state.apply_session_loaded(session("s-2", false), vec![ChatMessage::welcome()]);
        assert!(!state.can_compose());
        assert!(state.is_finalized());
    }
}
