//! Dashboard view models built from task and goal DTOs.

use std::collections::BTreeMap;

use super::api::{ActiveGoal, TaskSummary};

/// One task line on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub date: String,
    pub done: bool,
}

/// Tasks grouped under a date label, groups ordered by label.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup {
    pub label: String,
    pub tasks: Vec<TaskRow>,
}

/// One goal card on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRow {
    pub id: String,
    pub title: String,
    pub priority: i32,
    /// Completed fraction in [0, 1].
    pub progress: f64,
    /// Packed ARGB accent color.
    pub color: i64,
}

/// Completed fraction of a goal.
///
/// The divisor floors at one hour so goals without scheduled work do not
/// divide by zero; the result is clamped to [0, 1].
pub fn goal_progress(done_hours: f64, total_hours: f64) -> f64 {
    let total = if total_hours > 0.0 { total_hours } else { 1.0 };
    (done_hours / total).clamp(0.0, 1.0)
}

/// Group day-query tasks by their date string, ordered by date.
pub fn group_tasks(tasks: &[TaskSummary]) -> Vec<TaskGroup> {
    let mut by_date: BTreeMap<String, Vec<TaskRow>> = BTreeMap::new();
    for task in tasks {
        by_date
            .entry(task.date.clone())
            .or_default()
            .push(TaskRow {
                id: task.id.clone(),
                title: task.title.clone(),
                date: task.date.clone(),
                done: task.is_done(),
            });
    }

    by_date
        .into_iter()
        .map(|(label, tasks)| TaskGroup { label, tasks })
        .collect()
}

/// Map active goals to dashboard rows, ordered by priority.
///
/// A non-positive backend priority falls back to the goal's position in the
/// sorted list (1-based), so every card shows a usable rank.
pub fn goal_rows(goals: &[ActiveGoal]) -> Vec<GoalRow> {
    let mut sorted: Vec<&ActiveGoal> = goals.iter().collect();
    sorted.sort_by_key(|goal| goal.priority);

    sorted
        .iter()
        .enumerate()
        .map(|(index, goal)| GoalRow {
            id: goal.id.clone(),
            title: goal.title.clone(),
            priority: if goal.priority > 0 {
                goal.priority
            } else {
                (index + 1) as i32
            },
            progress: goal_progress(goal.done_task_hours, goal.total_task_hours),
            color: goal.color,
        })
        .collect()
}
