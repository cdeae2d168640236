//! Pre-TUI auth resolution.
//!
//! Runs before the terminal enters raw mode: decide whether the app can go
//! straight to the dashboard or must open on the sign-in screen. A stored
//! token is validated against the profile endpoint; only a definitive
//! rejection (401/403) discards it. Network trouble keeps the token and
//! lets the dashboard surface the error with its usual Retry affordance.

use tracing::{info, warn};

use crate::api::{ApiError, Repository};
use crate::config::StartupConfig;
use crate::session::SessionHandle;

use super::credentials::{Credentials, CredentialsManager};

/// Result of the startup auth check.
#[derive(Debug, Clone, PartialEq)]
pub enum PreflightOutcome {
    /// A working (or at least not rejected) session is installed.
    Ready,
    /// The sign-in screen must run; `notice` explains why, when known.
    NeedsLogin { notice: Option<String> },
}

impl PreflightOutcome {
    fn needs_login(notice: Option<String>) -> Self {
        PreflightOutcome::NeedsLogin { notice }
    }
}

/// Resolve the auth session from config token or stored credentials.
pub async fn resolve_session(
    repo: &dyn Repository,
    session: &SessionHandle,
    manager: Option<&CredentialsManager>,
    config: &StartupConfig,
) -> PreflightOutcome {
    // An explicitly supplied ID token wins over anything stored.
    if let Some(id_token) = &config.id_token {
        match repo.login_with_google(id_token).await {
            Ok(auth) => {
                info!(user = %auth.user.id, "signed in with supplied id token");
                session.authenticate(auth.token.clone(), auth.user.clone());
                persist_login(manager, &auth.token, &auth.user.id);
                return PreflightOutcome::Ready;
            }
            Err(err) => {
                warn!(error = %err, "supplied id token rejected");
                return PreflightOutcome::needs_login(Some(err.message()));
            }
        }
    }

    let stored = manager.map(|m| m.load()).unwrap_or_default();
    let Some(token) = stored.token.clone() else {
        return PreflightOutcome::needs_login(None);
    };

    session.set_token(token);
    match repo.fetch_profile().await {
        Ok(profile) => {
            info!(user = %profile.id, "restored session from stored credentials");
            session.set_profile(profile);
            PreflightOutcome::Ready
        }
        Err(ApiError::Status { status, .. }) if status == 401 || status == 403 => {
            // The backend no longer accepts this token.
            warn!(status, "stored token rejected, clearing credentials");
            session.sign_out();
            if let Some(m) = manager {
                m.clear();
            }
            PreflightOutcome::needs_login(Some("Session expired, please sign in again".to_string()))
        }
        Err(err) => {
            // Possibly offline; keep the token and let screens retry.
            warn!(error = %err, "could not validate stored token");
            PreflightOutcome::Ready
        }
    }
}

/// Store a fresh login for the next launch. Failure to write is logged and
/// otherwise ignored: persistence is a convenience, not a requirement.
pub fn persist_login(manager: Option<&CredentialsManager>, token: &str, user_id: &str) {
    if let Some(m) = manager {
        if !m.save(&Credentials::from_login(token, user_id)) {
            warn!("failed to persist credentials");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_login_carries_notice() {
        let outcome = PreflightOutcome::needs_login(Some("why".to_string()));
        assert_eq!(
            outcome,
            PreflightOutcome::NeedsLogin {
                notice: Some("why".to_string())
            }
        );
    }
}
