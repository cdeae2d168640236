//! Task detail screen: read-only view of a single task plus an inline
//! edit form for title, date, estimated hours and description.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::models::format_number;
use crate::state::{TaskField, TaskState};

use super::helpers::{render_text_field, spinner_frame};
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_DONE, COLOR_ERROR, COLOR_HEADER, COLOR_PENDING,
};

pub fn render_task_screen(frame: &mut Frame, app: &App) {
    let Some(state) = &app.task else {
        return;
    };
    let tick_count = app.tick_count;
    let area = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" TASK ")
        .title_style(Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if state.is_loading {
        let line = Line::from(vec![
            Span::styled(spinner_frame(tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::styled(" Loading task...", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), pad(inner));
        return;
    }

    if let Some(error) = &state.error {
        let lines = vec![
            Line::from(Span::styled(
                format!("Could not load this task: {error}"),
                Style::default().fg(COLOR_ERROR),
            )),
            Line::from(""),
            Line::from(Span::styled("[Esc] back", Style::default().fg(COLOR_DIM))),
        ];
        frame.render_widget(Paragraph::new(lines), pad(inner));
        return;
    }

    let Some(task) = &state.task else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(pad(inner));

    if state.edit.is_some() {
        render_edit_form(frame, chunks[0], state, tick_count);
    } else {
        render_detail(frame, chunks[0], state, tick_count);
    }

    let hints = if state.edit.is_some() {
        "[Tab] next field  [Enter] save  [Esc] cancel"
    } else if task.done {
        "[e] edit  [Space] mark not done  [Esc] back"
    } else {
        "[e] edit  [Space] mark done  [Esc] back"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(COLOR_DIM),
        ))),
        chunks[1],
    );
}

fn render_detail(frame: &mut Frame, area: Rect, state: &TaskState, tick_count: u64) {
    let Some(task) = &state.task else {
        return;
    };

    let status = if task.done {
        Span::styled("[x] done", Style::default().fg(COLOR_DONE))
    } else {
        Span::styled("[ ] open", Style::default().fg(COLOR_PENDING))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(status),
        Line::from(vec![
            Span::styled("Scheduled  ", Style::default().fg(COLOR_DIM)),
            Span::styled(display_date(&task.date), Style::default().fg(COLOR_ACCENT)),
        ]),
        Line::from(vec![
            Span::styled("Estimated  ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                format!("{} h", format_number(task.estimated_hours)),
                Style::default().fg(COLOR_ACCENT),
            ),
        ]),
        Line::from(""),
    ];

    match task.description.as_deref() {
        Some(description) if !description.is_empty() => {
            lines.push(Line::from(Span::styled(
                description.to_string(),
                Style::default().fg(COLOR_ACCENT),
            )));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "No description.",
                Style::default().fg(COLOR_DIM),
            )));
        }
    }

    if state.is_saving {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(spinner_frame(tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::styled(" Saving...", Style::default().fg(COLOR_DIM)),
        ]));
    } else if let Some(save_error) = &state.save_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            save_error.clone(),
            Style::default().fg(COLOR_ERROR),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_edit_form(frame: &mut Frame, area: Rect, state: &TaskState, tick_count: u64) {
    let Some(edit) = &state.edit else {
        return;
    };

    // Label row + input row per field, with a blank spacer between fields.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let fields = [
        (TaskField::Title, &edit.title, "Task title"),
        (TaskField::Date, &edit.date, "YYYY-MM-DD"),
        (TaskField::Hours, &edit.hours, "Hours, e.g. 1.5"),
        (TaskField::Description, &edit.description, "Optional notes"),
    ];

    for (index, (field, text, placeholder)) in fields.iter().enumerate() {
        let focused = edit.focus == *field && !state.is_saving;
        let label_style = if focused {
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(field.label(), label_style))),
            chunks[index * 3],
        );
        render_text_field(frame, chunks[index * 3 + 1], text, placeholder, focused, tick_count);
    }

    let status_area = chunks[12];
    if state.is_saving {
        let line = Line::from(vec![
            Span::styled(spinner_frame(tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::styled(" Saving...", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), status_area);
    } else if let Some(save_error) = &state.save_error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                save_error.clone(),
                Style::default().fg(COLOR_ERROR),
            ))),
            status_area,
        );
    }
}

/// Render an ISO date with its weekday when it parses, verbatim otherwise.
fn display_date(date: &str) -> String {
    match chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%A, %-d %B %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

fn pad(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_adds_weekday() {
        assert_eq!(display_date("2025-03-10"), "Monday, 10 March 2025");
    }

    #[test]
    fn test_display_date_passes_through_unparseable_input() {
        assert_eq!(display_date("soon"), "soon");
    }
}
