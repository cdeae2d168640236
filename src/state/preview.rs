//! Goal preview browsing: the draft plan the agent proposed, rendered as a
//! tree before anything is committed server-side.

use crate::api::Repository;
use crate::models::{format_hours, format_number, join_details, GoalPreview, TreeNode};

/// Error shown when the backend returns a preview without its goal section.
pub const MISSING_GOAL_ERROR: &str = "Preview is missing goal details.";

#[derive(Debug, Clone)]
pub struct PreviewState {
    pub preview_id: String,
    pub is_loading: bool,
    pub root: Option<TreeNode>,
    pub error: Option<String>,
    pub selected: usize,
}

impl PreviewState {
    pub fn new(preview_id: impl Into<String>) -> Self {
        Self {
            preview_id: preview_id.into(),
            is_loading: true,
            root: None,
            error: None,
            selected: 0,
        }
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.root = None;
        self.error = None;
        self.selected = 0;
    }

    pub fn apply_built(&mut self, preview_id: &str, root: TreeNode) {
        if preview_id != self.preview_id {
            return;
        }
        self.is_loading = false;
        self.root = Some(root);
        self.error = None;
    }

    pub fn apply_failed(&mut self, preview_id: &str, error: String) {
        if preview_id != self.preview_id {
            return;
        }
        self.is_loading = false;
        self.error = Some(error);
    }

    pub fn row_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.flatten().len())
    }

    pub fn select_next(&mut self) {
        let count = self.row_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Fetch a draft plan and shape it for display.
pub async fn load_preview(repo: &dyn Repository, preview_id: &str) -> Result<TreeNode, String> {
    let preview = repo
        .fetch_goal_preview(preview_id)
        .await
        .map_err(|e| e.message())?;
    preview_tree(&preview).ok_or_else(|| MISSING_GOAL_ERROR.to_string())
}

/// Build the display tree, or `None` when the preview has no goal section.
pub fn preview_tree(preview: &GoalPreview) -> Option<TreeNode> {
    let goal = preview.goal.as_ref()?;

    let subtitle = join_details([
        goal.description.clone().unwrap_or_default(),
        goal.hours_per_week
            .map(|hours| format!("{} h/week", format_number(hours)))
            .unwrap_or_default(),
    ]);

    let milestones = preview
        .milestones
        .iter()
        .enumerate()
        .map(|(index, milestone)| {
            let tasks = milestone
                .tasks
                .iter()
                .enumerate()
                .map(|(task_index, task)| {
                    let subtitle = join_details([
                        task.date.clone().unwrap_or_default(),
                        task.estimated_hours.map(format_hours).unwrap_or_default(),
                        task.description.clone().unwrap_or_default(),
                    ]);
                    TreeNode::leaf(
                        format!("preview-task-{}-{}", index, task_index),
                        task.title.clone(),
                        subtitle,
                    )
                })
                .collect();

            TreeNode::new(
                format!("preview-milestone-{}", index),
                milestone.title.clone(),
                milestone
                    .description
                    .clone()
                    .filter(|d| !d.trim().is_empty()),
                tasks,
            )
        })
        .collect();

    Some(TreeNode::new(
        "preview-root",
        goal.title.clone(),
        subtitle,
        milestones,
    ))
}
