//! Profile state: the signed-in user's details plus the two inline edits
//! the backend supports (display name and weekly hour budget).

use crate::api::Repository;
use crate::models::{format_number, Profile, ProfileUpdate};
use crate::widgets::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    AvailableHours,
}

#[derive(Debug, Clone)]
pub struct ProfileEdit {
    pub field: ProfileField,
    pub input: TextField,
}

/// What a profile save sends: the hour budget has its own PUT, everything
/// else goes through the partial PATCH.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSave {
    Hours(f64),
    Update(ProfileUpdate),
}

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub is_loading: bool,
    pub profile: Option<Profile>,
    pub error: Option<String>,
    pub edit: Option<ProfileEdit>,
    pub is_saving: bool,
    pub save_error: Option<String>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn apply_loaded(&mut self, profile: Profile) {
        self.is_loading = false;
        self.profile = Some(profile);
        self.error = None;
    }

    pub fn apply_load_failed(&mut self, error: String) {
        self.is_loading = false;
        self.error = Some(error);
    }

    pub fn begin_edit(&mut self, field: ProfileField) {
        let Some(profile) = &self.profile else {
            return;
        };
        let current = match field {
            ProfileField::Name => profile.name.clone(),
            ProfileField::AvailableHours => format_number(profile.available_hours_per_week),
        };
        self.edit = Some(ProfileEdit {
            field,
            input: TextField::with_content(current),
        });
        self.save_error = None;
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.save_error = None;
    }

    /// Validate the open edit and stage the save call.
    pub fn save_request(&mut self) -> Option<ProfileSave> {
        let edit = self.edit.as_ref()?;
        let value = edit.input.content().trim().to_string();

        let save = match edit.field {
            ProfileField::Name => {
                if value.is_empty() {
                    self.save_error = Some("Name cannot be empty".to_string());
                    return None;
                }
                ProfileSave::Update(ProfileUpdate {
                    name: Some(value),
                    ..ProfileUpdate::default()
                })
            }
            ProfileField::AvailableHours => {
                let hours: f64 = match value.parse() {
                    Ok(hours) => hours,
                    Err(_) => {
                        self.save_error = Some("Hours must be a number".to_string());
                        return None;
                    }
                };
                if !(0.0..=168.0).contains(&hours) {
                    self.save_error = Some("Hours must be between 0 and 168".to_string());
                    return None;
                }
                ProfileSave::Hours(hours)
            }
        };

        self.is_saving = true;
        self.save_error = None;
        Some(save)
    }

    pub fn apply_saved(&mut self, profile: Profile) {
        self.profile = Some(profile);
        self.edit = None;
        self.is_saving = false;
        self.save_error = None;
    }

    pub fn apply_save_failed(&mut self, error: String) {
        self.is_saving = false;
        self.save_error = Some(error);
    }
}

pub async fn load_profile(repo: &dyn Repository) -> Result<Profile, String> {
    repo.fetch_profile().await.map_err(|e| e.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: "u-1".to_string(),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            profile_image_url: None,
            timezone: Some("Europe/Berlin".to_string()),
            available_hours_per_week: 10.0,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded() -> ProfileState {
        let mut state = ProfileState::new();
        state.apply_loaded(profile());
        state
    }

    #[test]
    fn test_edit_prefills_current_value() {
        let mut state = loaded();
        state.begin_edit(ProfileField::AvailableHours);
        assert_eq!(state.edit.as_ref().unwrap().input.content(), "10");

        state.begin_edit(ProfileField::Name);
        assert_eq!(state.edit.as_ref().unwrap().input.content(), "Dana");
    }

    #[test]
    fn test_edit_requires_loaded_profile() {
        let mut state = ProfileState::new();
        state.begin_edit(ProfileField::Name);
        assert!(state.edit.is_none());
    }

    #[test]
    fn test_hours_save_uses_dedicated_call() {
        let mut state = loaded();
        state.begin_edit(ProfileField::AvailableHours);
        state.edit.as_mut().unwrap().input.set_content("12.5");
        assert_eq!(state.save_request(), Some(ProfileSave::Hours(12.5)));
        assert!(state.is_saving);
    }

    #[test]
    fn test_name_save_uses_partial_update() {
        let mut state = loaded();
        state.begin_edit(ProfileField::Name);
        state.edit.as_mut().unwrap().input.set_content("Dana K");
        let save = state.save_request().unwrap();
        match save {
            ProfileSave::Update(update) => {
                assert_eq!(update.name.as_deref(), Some("Dana K"));
                assert!(update.available_hours_per_week.is_none());
            }
            other => panic!("expected partial update, got {:?}", other),
        }
    }

    #[test]
    fn test_hours_validation() {
        let mut state = loaded();
        state.begin_edit(ProfileField::AvailableHours);
        state.edit.as_mut().unwrap().input.set_content("lots");
        assert!(state.save_request().is_none());
        assert_eq!(state.save_error.as_deref(), Some("Hours must be a number"));

        state.edit.as_mut().unwrap().input.set_content("200");
        assert!(state.save_request().is_none());
        assert_eq!(
            state.save_error.as_deref(),
            Some("Hours must be between 0 and 168")
        );
    }

    #[test]
    fn test_saved_closes_edit_and_updates_profile() {
        let mut state = loaded();
        state.begin_edit(ProfileField::AvailableHours);
        state.edit.as_mut().unwrap().input.set_content("12");
        state.save_request();

        let mut updated = profile();
        updated.available_hours_per_week = 12.0;
        state.apply_saved(updated);

        assert_eq!(
            state.profile.as_ref().unwrap().available_hours_per_week,
            12.0
        );
        assert!(state.edit.is_none());
        assert!(!state.is_saving);
    }

    #[test]
    fn test_save_failure_keeps_edit_open() {
        let mut state = loaded();
        state.begin_edit(ProfileField::Name);
        state.edit.as_mut().unwrap().input.set_content("Dana K");
        state.save_request();
        state.apply_save_failed("conflict".to_string());

        assert_eq!(state.save_error.as_deref(), Some("conflict"));
        assert!(state.edit.is_some());
    }
}
