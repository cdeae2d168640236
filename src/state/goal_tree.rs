//! Goal tree assembly and browsing state.
//!
//! The backend exposes no batch endpoint, so the tree is stitched together
//! fetch by fetch: goal detail, then the milestone list, then each milestone
//! detail, then each of its tasks. Any failure along the way aborts the
//! whole build; the screen never shows a partial tree.

use crate::api::Repository;
use crate::models::{
    capitalize, format_hours, join_details, GoalDetail, MilestoneDetail, TaskDetail, TreeNode,
};

#[derive(Debug, Clone)]
pub struct GoalTreeState {
    pub goal_id: String,
    pub is_loading: bool,
    pub root: Option<TreeNode>,
    pub error: Option<String>,
    pub selected: usize,
}

impl GoalTreeState {
    pub fn new(goal_id: impl Into<String>) -> Self {
        Self {
            goal_id: goal_id.into(),
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

    /// Results for a goal other than the one on screen are stale and dropped.
    pub fn apply_built(&mut self, goal_id: &str, root: TreeNode) {
        if goal_id != self.goal_id {
            return;
        }
        self.is_loading = false;
        self.root = Some(root);
        self.error = None;
    }

    pub fn apply_failed(&mut self, goal_id: &str, error: String) {
        if goal_id != self.goal_id {
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

    /// Id of the selected row when it is a task leaf (depth 2), for jumping
    /// to the task detail screen.
    pub fn selected_task_id(&self) -> Option<String> {
        let root = self.root.as_ref()?;
        let rows = root.flatten();
        let (depth, node) = rows.get(self.selected)?;
        if *depth == 2 {
            Some(node.id.clone())
        } else {
            None
        }
    }
}

/// Assemble the display tree for one goal, aborting on the first failure.
pub async fn build_goal_tree(repo: &dyn Repository, goal_id: &str) -> Result<TreeNode, String> {
    let goal = repo
        .fetch_goal_detail(goal_id)
        .await
        .map_err(|e| e.message())?;
    let summaries = repo
        .fetch_goal_milestones(goal_id)
        .await
        .map_err(|e| e.message())?;

    let mut milestones = Vec::with_capacity(summaries.len());
    for summary in &summaries {
        milestones.push(build_milestone_node(repo, &summary.id).await?);
    }

    Ok(goal_node(&goal, milestones))
}

async fn build_milestone_node(
    repo: &dyn Repository,
    milestone_id: &str,
) -> Result<TreeNode, String> {
    let detail = repo
        .fetch_milestone_detail(milestone_id)
        .await
        .map_err(|e| e.message())?;

    let mut tasks = Vec::with_capacity(detail.tasks.len());
    for task_id in &detail.tasks {
        let task = repo
            .fetch_task_detail(task_id)
            .await
            .map_err(|e| e.message())?;
        tasks.push(task_node(&task));
    }

    Ok(milestone_node(&detail, tasks))
}

fn goal_node(goal: &GoalDetail, children: Vec<TreeNode>) -> TreeNode {
    let subtitle = join_details([
        goal.description.clone().unwrap_or_default(),
        goal.start_date
            .as_deref()
            .filter(|date| !date.trim().is_empty())
            .map(|date| format!("Start: {}", date))
            .unwrap_or_default(),
    ]);
    TreeNode::new(goal.id.clone(), goal.title.clone(), subtitle, children)
}

fn milestone_node(detail: &MilestoneDetail, tasks: Vec<TreeNode>) -> TreeNode {
    let subtitle = join_details([
        capitalize(&detail.status),
        detail.description.clone().unwrap_or_default(),
    ]);
    TreeNode::new(detail.id.clone(), detail.title.clone(), subtitle, tasks)
}

fn task_node(task: &TaskDetail) -> TreeNode {
    let subtitle = join_details([
        task.date.clone(),
        format_hours(task.estimated_hours),
        if task.done { "Done" } else { "Pending" }.to_string(),
    ]);
    TreeNode::leaf(task.id.clone(), task.title.clone(), subtitle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: &str) -> GoalDetail {
        GoalDetail {
            id: id.to_string(),
            title: "Run a 10k".to_string(),
            description: Some("Couch to 10k".to_string()),
            start_date: Some("2025-09-01".to_string()),
            color: None,
            status: Some("active".to_string()),
            priority: Some(1),
            min_hours_per_week: None,
        }
    }

    fn milestone(id: &str, status: &str) -> MilestoneDetail {
        MilestoneDetail {
            id: id.to_string(),
            title: "Base fitness".to_string(),
            description: None,
            status: status.to_string(),
            tasks: Vec::new(),
        }
    }

    fn task(id: &str, done: bool) -> TaskDetail {
        TaskDetail {
            id: id.to_string(),
            milestone_id: Some("m1".to_string()),
            title: "Interval run".to_string(),
            description: None,
            date: "2025-09-03".to_string(),
            estimated_hours: 1.5,
            done,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_goal_subtitle_joins_description_and_start() {
        let node = goal_node(&goal("g1"), Vec::new());
        assert_eq!(
            node.subtitle.as_deref(),
            Some("Couch to 10k \u{2022} Start: 2025-09-01")
        );
    }

    #[test]
    fn test_goal_subtitle_absent_when_empty() {
        let mut bare = goal("g1");
        bare.description = None;
        bare.start_date = None;
        assert_eq!(goal_node(&bare, Vec::new()).subtitle, None);
    }

    #[test]
    fn test_milestone_subtitle_capitalizes_status() {
        let node = milestone_node(&milestone("m1", "in_progress"), Vec::new());
        assert_eq!(node.subtitle.as_deref(), Some("In_progress"));
    }

    #[test]
    fn test_task_subtitle_carries_date_hours_and_state() {
        let node = task_node(&task("t1", false));
        assert_eq!(
            node.subtitle.as_deref(),
            Some("2025-09-03 \u{2022} 1.5h \u{2022} Pending")
        );
        let done = task_node(&task("t1", true));
        assert!(done.subtitle.unwrap().ends_with("Done"));
    }

    #[test]
    fn test_apply_built_drops_stale_goal() {
        let mut state = GoalTreeState::new("g1");
        state.apply_built("g2", TreeNode::leaf("g2", "Other", None));
        assert!(state.root.is_none());
        assert!(state.is_loading);

        state.apply_built("g1", TreeNode::leaf("g1", "Mine", None));
        assert!(!state.is_loading);
        assert_eq!(state.root.as_ref().unwrap().id, "g1");
    }

    #[test]
    fn test_apply_failed_drops_stale_goal() {
        let mut state = GoalTreeState::new("g1");
        state.apply_failed("g2", "nope".to_string());
        assert!(state.error.is_none());
        state.apply_failed("g1", "nope".to_string());
        assert_eq!(state.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_selected_task_id_only_for_leaves() {
        let mut state = GoalTreeState::new("g1");
        let tree = goal_node(
            &goal("g1"),
            vec![milestone_node(
                &milestone("m1", "active"),
                vec![task_node(&task("t1", false))],
            )],
        );
        state.apply_built("g1", tree);

        assert_eq!(state.selected_task_id(), None);
        state.select_next();
        assert_eq!(state.selected_task_id(), None);
        state.select_next();
        assert_eq!(state.selected_task_id().as_deref(), Some("t1"));
        // Bottom of the list, further moves stay put.
        state.select_next();
        assert_eq!(state.selected, 2);
    }
}
