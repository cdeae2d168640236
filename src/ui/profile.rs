//! Profile screen: account details with inline edits for the display
//! name and the weekly hour budget.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::models::format_number;
use crate::state::{ProfileField, ProfileState};

use super::helpers::{render_text_field, spinner_frame};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};

pub fn render_profile_screen(frame: &mut Frame, app: &App) {
    let state = &app.profile;
    let tick_count = app.tick_count;
    let area = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" PROFILE ")
        .title_style(Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let content = Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    };

    if state.is_loading && state.profile.is_none() {
        let line = Line::from(vec![
            Span::styled(spinner_frame(tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::styled(" Loading profile...", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), content);
        return;
    }

    if state.profile.is_none() {
        if let Some(error) = &state.error {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Could not load your profile: {error}"),
                    Style::default().fg(COLOR_ERROR),
                )),
                Line::from(""),
                Line::from(Span::styled("[Esc] back", Style::default().fg(COLOR_DIM))),
            ];
            frame.render_widget(Paragraph::new(lines), content);
        }
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(content);

    render_details(frame, chunks[0], state, tick_count);

    let hints = if state.edit.is_some() {
        "[Enter] save  [Esc] cancel"
    } else {
        "[n] edit name  [h] edit weekly hours  [s] sign out  [Esc] back"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(COLOR_DIM),
        ))),
        chunks[1],
    );
}

fn render_details(frame: &mut Frame, area: Rect, state: &ProfileState, tick_count: u64) {
    let Some(profile) = &state.profile else {
        return;
    };

    // One label row and one value row per detail, in a fixed grid so the
    // edit input can replace a value row in place.
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
            Constraint::Min(0),
        ])
        .split(area);

    render_label(frame, chunks[0], "Name", editing(state, ProfileField::Name));
    match &state.edit {
        Some(edit) if edit.field == ProfileField::Name => {
            render_text_field(frame, chunks[1], &edit.input, "Your name", !state.is_saving, tick_count);
        }
        _ => render_value(frame, chunks[1], &profile.name),
    }

    render_label(frame, chunks[3], "Email", false);
    render_value(frame, chunks[4], &profile.email);

    render_label(
        frame,
        chunks[6],
        "Weekly hours for goals",
        editing(state, ProfileField::AvailableHours),
    );
    match &state.edit {
        Some(edit) if edit.field == ProfileField::AvailableHours => {
            render_text_field(frame, chunks[7], &edit.input, "Hours per week", !state.is_saving, tick_count);
        }
        _ => render_value(
            frame,
            chunks[7],
            &format!("{} h", format_number(profile.available_hours_per_week)),
        ),
    }

    let status = chunks[9];
    if state.is_saving {
        let line = Line::from(vec![
            Span::styled(spinner_frame(tick_count), Style::default().fg(COLOR_ACCENT)),
            Span::styled(" Saving...", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), status);
    } else if let Some(save_error) = &state.save_error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                save_error.clone(),
                Style::default().fg(COLOR_ERROR),
            ))),
            status,
        );
    }
}

fn editing(state: &ProfileState, field: ProfileField) -> bool {
    state.edit.as_ref().is_some_and(|edit| edit.field == field)
}

fn render_label(frame: &mut Frame, area: Rect, label: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(label.to_string(), style))), area);
}

fn render_value(frame: &mut Frame, area: Rect, value: &str) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(COLOR_ACCENT),
        ))),
        area,
    );
}
