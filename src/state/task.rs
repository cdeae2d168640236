//! Task detail state, including the inline edit form.

use chrono::NaiveDate;

use crate::api::Repository;
use crate::models::{format_number, TaskDetail, TaskUpdate};
use crate::widgets::TextField;

/// Form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Date,
    Hours,
    Description,
}

impl TaskField {
    pub fn next(self) -> Self {
        match self {
            TaskField::Title => TaskField::Date,
            TaskField::Date => TaskField::Hours,
            TaskField::Hours => TaskField::Description,
            TaskField::Description => TaskField::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskField::Title => "Title",
            TaskField::Date => "Date",
            TaskField::Hours => "Estimated hours",
            TaskField::Description => "Description",
        }
    }
}

/// In-progress edit of a task. Only fields that differ from the loaded task
/// end up in the PATCH body.
#[derive(Debug, Clone)]
pub struct TaskEdit {
    pub focus: TaskField,
    pub title: TextField,
    pub date: TextField,
    pub hours: TextField,
    pub description: TextField,
}

impl TaskEdit {
    pub fn from_task(task: &TaskDetail) -> Self {
        Self {
            focus: TaskField::Title,
            title: TextField::with_content(task.title.clone()),
            date: TextField::with_content(task.date.clone()),
            hours: TextField::with_content(format_number(task.estimated_hours)),
            description: TextField::with_content(task.description.clone().unwrap_or_default()),
        }
    }

    pub fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            TaskField::Title => &mut self.title,
            TaskField::Date => &mut self.date,
            TaskField::Hours => &mut self.hours,
            TaskField::Description => &mut self.description,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Build the partial update against the loaded task. Unchanged fields
    /// are left out of the body entirely.
    pub fn to_update(&self, task: &TaskDetail) -> Result<TaskUpdate, String> {
        let title = self.title.content().trim();
        if title.is_empty() {
            return Err("Title cannot be empty".to_string());
        }

        let date = self.date.content().trim();
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err("Date must be YYYY-MM-DD".to_string());
        }

        let hours: f64 = self
            .hours
            .content()
            .trim()
            .parse()
            .map_err(|_| "Estimated hours must be a number".to_string())?;
        if hours < 0.0 {
            return Err("Estimated hours cannot be negative".to_string());
        }

        let description = self.description.content().trim();

        let mut update = TaskUpdate::default();
        if title != task.title {
            update.title = Some(title.to_string());
        }
        if date != task.date {
            update.date = Some(date.to_string());
        }
        if hours != task.estimated_hours {
            update.estimated_hours = Some(hours);
        }
        if description != task.description.as_deref().unwrap_or_default() {
            update.description = Some(description.to_string());
        }
        Ok(update)
    }
}

#[derive(Debug, Clone)]
pub struct TaskState {
    pub task_id: String,
    pub is_loading: bool,
    pub task: Option<TaskDetail>,
    pub error: Option<String>,
    pub edit: Option<TaskEdit>,
    pub is_saving: bool,
    pub save_error: Option<String>,
}

impl TaskState {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            is_loading: true,
            task: None,
            error: None,
            edit: None,
            is_saving: false,
            save_error: None,
        }
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.task = None;
        self.error = None;
        self.edit = None;
    }

    pub fn apply_loaded(&mut self, task_id: &str, task: TaskDetail) {
        if task_id != self.task_id {
            return;
        }
        self.is_loading = false;
        self.task = Some(task);
        self.error = None;
    }

    pub fn apply_load_failed(&mut self, task_id: &str, error: String) {
        if task_id != self.task_id {
            return;
        }
        self.is_loading = false;
        self.error = Some(error);
    }

    /// Flip the completion flag; the caller posts the returned update.
    pub fn toggle_done(&self) -> Option<TaskUpdate> {
        let task = self.task.as_ref()?;
        Some(TaskUpdate::done(!task.done))
    }

    pub fn begin_edit(&mut self) {
        if let Some(task) = &self.task {
            self.edit = Some(TaskEdit::from_task(task));
            self.save_error = None;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.save_error = None;
    }

    /// Validate the form and stage the PATCH body. A form with nothing
    /// changed just closes the editor.
    pub fn save_request(&mut self) -> Option<TaskUpdate> {
        let task = self.task.as_ref()?;
        let edit = self.edit.as_ref()?;
        match edit.to_update(task) {
            Ok(update) => {
                if update == TaskUpdate::default() {
                    self.edit = None;
                    self.save_error = None;
                    None
                } else {
                    self.is_saving = true;
                    self.save_error = None;
                    Some(update)
                }
            }
            Err(message) => {
                self.save_error = Some(message);
                None
            }
        }
    }

    /// Server accepted an update (toggle or edit save): swap in the
    /// returned task and close the form.
    pub fn apply_updated(&mut self, task_id: &str, task: TaskDetail) {
        if task_id != self.task_id {
            return;
        }
        self.task = Some(task);
        self.error = None;
        self.edit = None;
        self.is_saving = false;
        self.save_error = None;
    }

    /// A failed toggle keeps the prior state silently; a failed edit save
    /// keeps the form open with the error shown.
    pub fn apply_update_failed(&mut self, task_id: &str, error: String) {
        if task_id != self.task_id {
            return;
        }
        if self.is_saving {
            self.is_saving = false;
            self.save_error = Some(error);
        }
    }
}

pub async fn load_task(repo: &dyn Repository, task_id: &str) -> Result<TaskDetail, String> {
    repo.fetch_task_detail(task_id)
        .await
        .map_err(|e| e.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> TaskDetail {
        TaskDetail {
            id: "t1".to_string(),
            milestone_id: Some("m1".to_string()),
            title: "Interval run".to_string(),
            description: None,
            date: "2025-09-03".to_string(),
            estimated_hours: 1.5,
            done: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded() -> TaskState {
        let mut state = TaskState::new("t1");
        state.apply_loaded("t1", task());
        state
    }

    #[test]
    fn test_loaded_drops_stale_task() {
        let mut state = TaskState::new("t1");
        let mut other = task();
        other.id = "t2".to_string();
        state.apply_loaded("t2", other);
        assert!(state.task.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn test_toggle_done_flips_flag() {
        let state = loaded();
        assert_eq!(state.toggle_done(), Some(TaskUpdate::done(true)));
    }

    #[test]
    fn test_edit_prefills_from_task() {
        let mut state = loaded();
        state.begin_edit();
        let edit = state.edit.as_ref().unwrap();
        assert_eq!(edit.title.content(), "Interval run");
        assert_eq!(edit.date.content(), "2025-09-03");
        assert_eq!(edit.hours.content(), "1.5");
        assert_eq!(edit.description.content(), "");
    }

    #[test]
    fn test_save_request_only_carries_changes() {
        let mut state = loaded();
        state.begin_edit();
        {
            let edit = state.edit.as_mut().unwrap();
            edit.title.set_content("Tempo run");
        }
        let update = state.save_request().unwrap();
        assert_eq!(update.title.as_deref(), Some("Tempo run"));
        assert!(update.date.is_none());
        assert!(update.estimated_hours.is_none());
        assert!(state.is_saving);
    }

    #[test]
    fn test_save_request_unchanged_closes_editor() {
        let mut state = loaded();
        state.begin_edit();
        assert!(state.save_request().is_none());
        assert!(state.edit.is_none());
        assert!(!state.is_saving);
    }

    #[test]
    fn test_save_request_rejects_bad_hours() {
        let mut state = loaded();
        state.begin_edit();
        state.edit.as_mut().unwrap().hours.set_content("soon");
        assert!(state.save_request().is_none());
        assert_eq!(
            state.save_error.as_deref(),
            Some("Estimated hours must be a number")
        );
        assert!(state.edit.is_some());
    }

    #[test]
    fn test_save_request_rejects_bad_date() {
        let mut state = loaded();
        state.begin_edit();
        state.edit.as_mut().unwrap().date.set_content("tomorrow");
        assert!(state.save_request().is_none());
        assert_eq!(state.save_error.as_deref(), Some("Date must be YYYY-MM-DD"));
    }

    #[test]
    fn test_save_request_rejects_empty_title() {
        let mut state = loaded();
        state.begin_edit();
        state.edit.as_mut().unwrap().title.clear();
        assert!(state.save_request().is_none());
        assert_eq!(state.save_error.as_deref(), Some("Title cannot be empty"));
    }

    #[test]
    fn test_update_success_swaps_task_and_closes_form() {
        let mut state = loaded();
        state.begin_edit();
        state.edit.as_mut().unwrap().title.set_content("Tempo run");
        state.save_request();

        let mut saved = task();
        saved.title = "Tempo run".to_string();
        state.apply_updated("t1", saved);

        assert_eq!(state.task.as_ref().unwrap().title, "Tempo run");
        assert!(state.edit.is_none());
        assert!(!state.is_saving);
    }

    #[test]
    fn test_toggle_failure_is_silent() {
        let mut state = loaded();
        state.apply_update_failed("t1", "offline".to_string());
        assert!(state.save_error.is_none());
        assert!(!state.task.as_ref().unwrap().done);
    }

    #[test]
    fn test_save_failure_keeps_form_open_with_error() {
        let mut state = loaded();
        state.begin_edit();
        state.edit.as_mut().unwrap().title.set_content("Tempo run");
        state.save_request();
        state.apply_update_failed("t1", "validation failed".to_string());

        assert_eq!(state.save_error.as_deref(), Some("validation failed"));
        assert!(state.edit.is_some());
        assert!(!state.is_saving);
    }

    #[test]
    fn test_field_tab_order_wraps() {
        let mut field = TaskField::Title;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, TaskField::Title);
    }
}
