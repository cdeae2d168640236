//! Display tree for goals and goal previews.

/// One node of the rendered goal tree: the goal at the root, milestones
/// below it, tasks as leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subtitle: Option<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle,
            children,
        }
    }

    pub fn leaf(id: impl Into<String>, title: impl Into<String>, subtitle: Option<String>) -> Self {
        Self::new(id, title, subtitle, Vec::new())
    }

    /// Depth-first flattening for list rendering: (depth, node) pairs in
    /// display order, the receiver at depth 0.
    pub fn flatten(&self) -> Vec<(usize, &TreeNode)> {
        let mut rows = Vec::new();
        self.push_rows(0, &mut rows);
        rows
    }

    fn push_rows<'a>(&'a self, depth: usize, rows: &mut Vec<(usize, &'a TreeNode)>) {
        rows.push((depth, self));
        for child in &self.children {
            child.push_rows(depth + 1, rows);
        }
    }
}

/// Join non-empty detail fragments with a dot separator.
///
/// Returns `None` when every fragment is empty, so callers can skip the
/// subtitle line entirely.
pub fn join_details<I>(parts: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let joined: Vec<String> = parts
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join(" \u{2022} "))
    }
}

/// Uppercase the first character ("active" -> "Active").
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render an hour count without a trailing ".0" (2.0 -> "2", 2.5 -> "2.5").
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Hour label used in node subtitles and detail screens.
pub fn format_hours(hours: f64) -> String {
    format!("{}h", format_number(hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_orders_depth_first() {
        let tree = TreeNode::new(
            "g",
            "Goal",
            None,
            vec![
                TreeNode::new(
                    "m1",
                    "First",
                    None,
                    vec![TreeNode::leaf("t1", "Task", None)],
                ),
                TreeNode::leaf("m2", "Second", None),
            ],
        );

        let rows = tree.flatten();
        let ids: Vec<(usize, &str)> = rows.iter().map(|(d, n)| (*d, n.id.as_str())).collect();
        assert_eq!(ids, vec![(0, "g"), (1, "m1"), (2, "t1"), (1, "m2")]);
    }

    #[test]
    fn test_join_details_skips_blank_parts() {
        let subtitle = join_details(vec![
            "".to_string(),
            "2.5h".to_string(),
            "  ".to_string(),
            "Pending".to_string(),
        ]);
        assert_eq!(subtitle.as_deref(), Some("2.5h \u{2022} Pending"));
    }

    #[test]
    fn test_join_details_all_blank_is_none() {
        assert_eq!(join_details(vec!["".to_string(), " ".to_string()]), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("active"), "Active");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Done"), "Done");
    }

    #[test]
    fn test_format_hours_trims_whole_numbers() {
        assert_eq!(format_hours(2.0), "2h");
        assert_eq!(format_hours(2.5), "2.5h");
        assert_eq!(format_hours(0.25), "0.25h");
    }
}
