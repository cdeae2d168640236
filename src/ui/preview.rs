//! Preview screen: the plan the agent proposed in chat, shown as the
//! same outline the goal tree uses but without task navigation.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

use super::helpers::spinner_frame;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};
use super::tree::render_tree;

pub fn render_preview_screen(frame: &mut Frame, app: &App) {
    let Some(state) = &app.preview else {
        return;
    };
    let tick_count = app.tick_count;
    let area = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" PROPOSED PLAN ")
        .title_style(Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let content = Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    };

    if state.is_loading {
        let line = Line::from(vec![
            Span::styled(spinner_frame(tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::styled(" Fetching the proposal...", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), content);
        return;
    }

    if let Some(error) = &state.error {
        let lines = vec![
            Line::from(Span::styled(
                format!("Could not load the proposal: {error}"),
                Style::default().fg(COLOR_ERROR),
            )),
            Line::from(""),
            Line::from(Span::styled("[Esc] back", Style::default().fg(COLOR_DIM))),
        ];
        frame.render_widget(Paragraph::new(lines), content);
        return;
    }

    let Some(root) = &state.root else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(content);

    render_tree(frame, chunks[0], root, state.selected);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "[j/k] move  [Esc] back to chat",
            Style::default().fg(COLOR_DIM),
        ))),
        chunks[1],
    );
}
