//! Dashboard state: the selected day's tasks plus the active goal list.

use chrono::NaiveDate;

use crate::api::Repository;
use crate::models::{goal_rows, group_tasks, GoalRow, TaskGroup};

/// Ticks an optimistic completion mark stays pending before it is committed
/// to the backend. At the 16ms loop tick this is roughly five seconds,
/// matching the length of a short snackbar.
pub const UNDO_WINDOW_TICKS: u32 = 300;

/// Which dashboard column the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Tasks,
    Goals,
}

/// A completion toggle shown locally but not yet sent to the backend.
/// Pressing undo within the window drops it without any network traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingToggle {
    pub task_id: String,
    pub title: String,
    pub done: bool,
    pub ticks_left: u32,
}

#[derive(Debug, Clone)]
pub struct HomeState {
    pub day: NaiveDate,
    pub is_loading: bool,
    pub error: Option<String>,
    pub task_groups: Vec<TaskGroup>,
    pub goals: Vec<GoalRow>,
    pub focus: HomeFocus,
    pub selected_task: usize,
    pub selected_goal: usize,
    pub pending_toggle: Option<PendingToggle>,
}

impl HomeState {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            is_loading: true,
            error: None,
            task_groups: Vec::new(),
            goals: Vec::new(),
            focus: HomeFocus::Tasks,
            selected_task: 0,
            selected_goal: 0,
            pending_toggle: None,
        }
    }

    pub fn begin_refresh(&mut self, day: NaiveDate) {
        self.day = day;
        self.is_loading = true;
        self.error = None;
    }

    /// Apply a finished refresh. Results for a day other than the one
    /// currently shown are dropped as stale.
    pub fn apply_loaded(&mut self, day: NaiveDate, groups: Vec<TaskGroup>, goals: Vec<GoalRow>) {
        if day != self.day {
            return;
        }
        self.task_groups = groups;
        self.goals = goals;
        self.is_loading = false;
        self.error = None;
        self.clamp_selection();
    }

    /// A failed refresh keeps whatever was on screen and surfaces the error.
    pub fn apply_load_failed(&mut self, day: NaiveDate, error: String) {
        if day != self.day {
            return;
        }
        self.is_loading = false;
        self.error = Some(error);
    }

    /// Flip the completion mark of the selected task locally and open an
    /// undo window. Returns a toggle that must be committed immediately
    /// because a new one replaced it before its window ran out.
    pub fn toggle_selected_task(&mut self) -> Option<PendingToggle> {
        let task = self.selected_task_row()?;
        let task_id = task.id.clone();
        let title = task.title.clone();
        let done = !task.done;

        let flushed = self.pending_toggle.take();
        self.set_task_done(&task_id, done);
        self.pending_toggle = Some(PendingToggle {
            task_id,
            title,
            done,
            ticks_left: UNDO_WINDOW_TICKS,
        });
        flushed
    }

    /// Revert the pending local mark without contacting the backend.
    pub fn undo_pending_toggle(&mut self) {
        if let Some(pending) = self.pending_toggle.take() {
            self.set_task_done(&pending.task_id, !pending.done);
        }
    }

    /// Advance the undo window by one loop tick. When the window closes the
    /// toggle is handed back so the caller can commit it.
    pub fn tick(&mut self) -> Option<PendingToggle> {
        let pending = self.pending_toggle.as_mut()?;
        pending.ticks_left = pending.ticks_left.saturating_sub(1);
        if pending.ticks_left == 0 {
            self.pending_toggle.take()
        } else {
            None
        }
    }

    pub fn select_next(&mut self) {
        match self.focus {
            HomeFocus::Tasks => {
                let count = self.task_count();
                if count > 0 && self.selected_task + 1 < count {
                    self.selected_task += 1;
                }
            }
            HomeFocus::Goals => {
                if !self.goals.is_empty() && self.selected_goal + 1 < self.goals.len() {
                    self.selected_goal += 1;
                }
            }
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            HomeFocus::Tasks => self.selected_task = self.selected_task.saturating_sub(1),
            HomeFocus::Goals => self.selected_goal = self.selected_goal.saturating_sub(1),
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            HomeFocus::Tasks => HomeFocus::Goals,
            HomeFocus::Goals => HomeFocus::Tasks,
        };
    }

    pub fn task_count(&self) -> usize {
        self.task_groups.iter().map(|g| g.tasks.len()).sum()
    }

    /// Task row at the flat selection index, walking groups in order.
    pub fn selected_task_row(&self) -> Option<&crate::models::TaskRow> {
        let mut index = self.selected_task;
        for group in &self.task_groups {
            if index < group.tasks.len() {
                return group.tasks.get(index);
            }
            index -= group.tasks.len();
        }
        None
    }

    pub fn selected_goal_row(&self) -> Option<&GoalRow> {
        self.goals.get(self.selected_goal)
    }

    fn set_task_done(&mut self, task_id: &str, done: bool) {
        for group in &mut self.task_groups {
            for task in &mut group.tasks {
                if task.id == task_id {
                    task.done = done;
                }
            }
        }
    }

    fn clamp_selection(&mut self) {
        let tasks = self.task_count();
        if self.selected_task >= tasks {
            self.selected_task = tasks.saturating_sub(1);
        }
        if self.selected_goal >= self.goals.len() {
            self.selected_goal = self.goals.len().saturating_sub(1);
        }
    }
}

/// Fetch the day's tasks and the active goals together.
///
/// Both requests run concurrently; the first failure (tasks checked first)
/// fails the whole refresh and the other result is discarded.
pub async fn load_dashboard(
    repo: &dyn Repository,
    day: NaiveDate,
) -> Result<(Vec<TaskGroup>, Vec<GoalRow>), String> {
    let (tasks, goals) = tokio::join!(repo.fetch_tasks_for_day(day), repo.fetch_active_goals());
    let tasks = tasks.map_err(|e| e.message())?;
    let goals = goals.map_err(|e| e.message())?;
    Ok((group_tasks(&tasks), goal_rows(&goals)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskGroup, TaskRow};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn groups() -> Vec<TaskGroup> {
        vec![
            TaskGroup {
                label: "2025-09-01".to_string(),
                tasks: vec![
                    TaskRow {
                        id: "t1".to_string(),
                        title: "Stretch".to_string(),
                        date: "2025-09-01".to_string(),
                        done: false,
                    },
                    TaskRow {
                        id: "t2".to_string(),
                        title: "Run".to_string(),
                        date: "2025-09-01".to_string(),
                        done: false,
                    },
                ],
            },
            TaskGroup {
                label: "2025-09-02".to_string(),
                tasks: vec![TaskRow {
                    id: "t3".to_string(),
                    title: "Review".to_string(),
                    date: "2025-09-02".to_string(),
                    done: true,
                }],
            },
        ]
    }

    fn loaded_state() -> HomeState {
        let mut state = HomeState::new(day());
        state.apply_loaded(day(), groups(), Vec::new());
        state
    }

    #[test]
    fn test_apply_loaded_clears_loading_and_error() {
        let mut state = HomeState::new(day());
        state.error = Some("old".to_string());
        state.apply_loaded(day(), groups(), Vec::new());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.task_count(), 3);
    }

    #[test]
    fn test_apply_loaded_drops_stale_day() {
        let mut state = loaded_state();
        let other = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
        state.apply_loaded(other, Vec::new(), Vec::new());
        // The stale result for another day must not wipe current data.
        assert_eq!(state.task_count(), 3);
    }

    #[test]
    fn test_apply_load_failed_keeps_existing_data() {
        let mut state = loaded_state();
        state.begin_refresh(day());
        state.apply_load_failed(day(), "goals down".to_string());
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("goals down"));
        assert_eq!(state.task_count(), 3);
    }

    #[test]
    fn test_selected_task_row_walks_groups() {
        let mut state = loaded_state();
        state.selected_task = 2;
        assert_eq!(state.selected_task_row().unwrap().id, "t3");
    }

    #[test]
    fn test_toggle_marks_locally_and_opens_window() {
        let mut state = loaded_state();
        let flushed = state.toggle_selected_task();
        assert!(flushed.is_none());
        assert!(state.selected_task_row().unwrap().done);

        let pending = state.pending_toggle.as_ref().unwrap();
        assert_eq!(pending.task_id, "t1");
        assert!(pending.done);
        assert_eq!(pending.ticks_left, UNDO_WINDOW_TICKS);
    }

    #[test]
    fn test_undo_reverts_local_mark() {
        let mut state = loaded_state();
        state.toggle_selected_task();
        state.undo_pending_toggle();
        assert!(!state.selected_task_row().unwrap().done);
        assert!(state.pending_toggle.is_none());
    }

    #[test]
    fn test_tick_commits_after_window() {
        let mut state = loaded_state();
        state.toggle_selected_task();
        for _ in 0..UNDO_WINDOW_TICKS - 1 {
            assert!(state.tick().is_none());
        }
        let committed = state.tick().unwrap();
        assert_eq!(committed.task_id, "t1");
        assert!(committed.done);
        assert!(state.pending_toggle.is_none());
    }

    #[test]
    fn test_second_toggle_flushes_first() {
        let mut state = loaded_state();
        state.toggle_selected_task();
        state.selected_task = 1;
        let flushed = state.toggle_selected_task().unwrap();
        assert_eq!(flushed.task_id, "t1");
        assert_eq!(state.pending_toggle.as_ref().unwrap().task_id, "t2");
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = loaded_state();
        for _ in 0..10 {
            state.select_next();
        }
        assert_eq!(state.selected_task, 2);
        for _ in 0..10 {
            state.select_prev();
        }
        assert_eq!(state.selected_task, 0);
    }

    #[test]
    fn test_apply_loaded_clamps_selection() {
        let mut state = loaded_state();
        state.selected_task = 2;
        state.apply_loaded(
            day(),
            vec![TaskGroup {
                label: "2025-09-01".to_string(),
                tasks: vec![TaskRow {
                    id: "t1".to_string(),
                    title: "Stretch".to_string(),
                    date: "2025-09-01".to_string(),
                    done: false,
                }],
            }],
            Vec::new(),
        );
        assert_eq!(state.selected_task, 0);
    }
}
