//! Sign-in state. The screen takes a pasted Google ID token; platform
//! sign-in SDKs are out of scope for a terminal client.

use crate::widgets::TextField;

#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub input: TextField,
    pub is_loading: bool,
    pub error: Option<String>,
    /// One-line banner carried over from preflight ("Session expired, ...").
    pub notice: Option<String>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notice(notice: Option<String>) -> Self {
        Self {
            notice,
            ..Self::default()
        }
    }

    /// Take the pasted token for the exchange. Blank input and double
    /// submits are no-ops.
    pub fn submit(&mut self) -> Option<String> {
        if self.is_loading {
            return None;
        }
        let token = self.input.content().trim().to_string();
        if token.is_empty() {
            return None;
        }
        self.is_loading = true;
        self.error = None;
        self.notice = None;
        Some(token)
    }

    pub fn apply_failed(&mut self, error: String) {
        self.is_loading = false;
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_submit_is_no_op() {
        let mut state = LoginState::new();
        state.input.insert_str("   ");
        assert_eq!(state.submit(), None);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_submit_trims_and_locks() {
        let mut state = LoginState::new();
        state.input.insert_str("  token-123  ");
        assert_eq!(state.submit(), Some("token-123".to_string()));
        assert!(state.is_loading);
        // Locked while the exchange is in flight.
        assert_eq!(state.submit(), None);
    }

    #[test]
    fn test_failure_unlocks_with_error() {
        let mut state = LoginState::new();
        state.input.insert_str("bad-token");
        state.submit();
        state.apply_failed("Invalid token".to_string());
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Invalid token"));
    }

    #[test]
    fn test_notice_clears_on_submit() {
        let mut state = LoginState::with_notice(Some("Session expired".to_string()));
        state.input.insert_str("token");
        state.submit();
        assert!(state.notice.is_none());
    }
}
