//! Indented tree list shared by the goal and preview screens.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::models::TreeNode;

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_HEADER};

/// Render a flattened tree with one row per node.
///
/// Rows are indented two cells per depth level; the selected row gets a
/// marker and bold title. Scrolls so the selection stays visible.
pub fn render_tree(frame: &mut Frame, area: Rect, root: &TreeNode, selected: usize) {
    let rows = root.flatten();
    if rows.is_empty() || area.height == 0 {
        return;
    }

    let visible = area.height as usize;
    let first = selected.saturating_sub(visible.saturating_sub(1));

    let mut lines = Vec::with_capacity(visible);
    for (i, (depth, node)) in rows.iter().enumerate().skip(first).take(visible) {
        let is_selected = i == selected;
        let marker = if is_selected { "▶ " } else { "  " };
        let indent = "  ".repeat(*depth);

        let title_style = if is_selected {
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(COLOR_HEADER)),
            Span::raw(indent),
            Span::styled(node.title.clone(), title_style),
        ];
        if let Some(subtitle) = &node.subtitle {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                subtitle.clone(),
                Style::default().fg(COLOR_DIM),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
