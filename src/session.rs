//! Shared auth session: token, user id, and the signed-in profile.
//!
//! A [`SessionHandle`] is cloned into the transport (for the bearer token)
//! and into every screen that needs the current user. It is written only by
//! the login, sign-out, and profile-refresh flows; everything else reads.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::Profile;

#[derive(Debug, Default)]
struct SessionData {
    token: Option<String>,
    user_id: Option<String>,
    profile: Option<Profile>,
}

/// Cheaply cloneable handle to the process-wide auth session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SessionData>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means a reader panicked mid-access; the data is
    // plain strings, so recover it instead of propagating the panic.
    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().user_id.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.read().profile.clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.read().token.is_some()
    }

    /// Install a bearer token without profile data (stored credentials at
    /// startup, before the profile has been validated).
    pub fn set_token(&self, token: impl Into<String>) {
        self.write().token = Some(token.into());
    }

    /// Record a successful login: token plus the authenticated profile.
    pub fn authenticate(&self, token: impl Into<String>, profile: Profile) {
        let mut data = self.write();
        data.token = Some(token.into());
        data.user_id = Some(profile.id.clone());
        data.profile = Some(profile);
    }

    /// Replace the cached profile after a refresh or profile update.
    pub fn set_profile(&self, profile: Profile) {
        let mut data = self.write();
        data.user_id = Some(profile.id.clone());
        data.profile = Some(profile);
    }

    /// Drop all auth state.
    pub fn sign_out(&self) {
        let mut data = self.write();
        data.token = None;
        data.user_id = None;
        data.profile = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            profile_image_url: None,
            timezone: None,
            available_hours_per_week: 10.0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_new_session_is_signed_out() {
        let session = SessionHandle::new();
        assert!(!session.is_signed_in());
        assert!(session.token().is_none());
        assert!(session.user_id().is_none());
        assert!(session.profile().is_none());
    }

    #[test]
    fn test_authenticate_sets_all_fields() {
        let session = SessionHandle::new();
        session.authenticate("tok-1", profile("u-1"));

        assert!(session.is_signed_in());
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(session.user_id().as_deref(), Some("u-1"));
        assert_eq!(session.profile().map(|p| p.name), Some("Dana".to_string()));
    }

    #[test]
    fn test_set_token_alone_keeps_profile_empty() {
        let session = SessionHandle::new();
        session.set_token("stored-tok");
        assert!(session.is_signed_in());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn test_set_profile_updates_user_id() {
        let session = SessionHandle::new();
        session.set_token("tok");
        session.set_profile(profile("u-9"));
        assert_eq!(session.user_id().as_deref(), Some("u-9"));
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let session = SessionHandle::new();
        session.authenticate("tok", profile("u-1"));
        session.sign_out();

        assert!(!session.is_signed_in());
        assert!(session.user_id().is_none());
        assert!(session.profile().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionHandle::new();
        let clone = session.clone();
        session.authenticate("tok", profile("u-1"));
        assert_eq!(clone.token().as_deref(), Some("tok"));
    }
}
