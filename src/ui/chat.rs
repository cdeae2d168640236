//! Goal-building chat screen.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::models::ChatSender;

use super::helpers::{inner_rect, render_text_field, spinner_frame};
use super::theme::{
    COLOR_ACCENT, COLOR_AGENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_USER,
};

pub fn render_chat_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" GOAL PLANNER ");
    frame.render_widget(outer, area);
    let inner = inner_rect(area, 1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Transcript
            Constraint::Length(1), // Status / error line
            Constraint::Length(2), // Input
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    render_transcript(frame, chunks[0], app);
    render_status(frame, chunks[1], app);
    render_input(frame, chunks[2], app);
    render_hints(frame, chunks[3], app);
}

fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    if app.chat.is_loading {
        let loading = Line::from(vec![
            Span::styled(spinner_frame(app.tick_count), Style::default().fg(COLOR_HEADER)),
            Span::styled(" Resuming conversation...", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(loading), area);
        return;
    }

    let width = area.width.saturating_sub(8).max(10) as usize;

    // Wrap each message and prefix it with a sender bar; newest at the bottom
    let mut lines: Vec<Line> = Vec::new();
    for message in &app.chat.messages {
        let (bar_color, label) = match message.sender {
            ChatSender::User => (COLOR_USER, "you"),
            ChatSender::Agent => (COLOR_AGENT, "agent"),
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(bar_color).add_modifier(Modifier::BOLD),
        )));
        for wrapped in wrap_text(&message.text, width) {
            lines.push(Line::from(vec![
                Span::styled("│ ", Style::default().fg(bar_color)),
                Span::styled(wrapped, Style::default().fg(COLOR_ACCENT)),
            ]));
        }
        lines.push(Line::from(""));
    }

    if app.chat.is_sending {
        lines.push(Line::from(vec![
            Span::styled(spinner_frame(app.tick_count), Style::default().fg(COLOR_AGENT)),
            Span::styled(" Thinking...", Style::default().fg(COLOR_DIM)),
        ]));
    }

    // Anchor to the bottom, offset by how far the user scrolled up
    let visible = area.height as usize;
    let total = lines.len();
    let scroll = app.chat.scroll_from_bottom as usize;
    let end = total.saturating_sub(scroll);
    let start = end.saturating_sub(visible);
    let window: Vec<Line> = lines
        .into_iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect();
    frame.render_widget(Paragraph::new(window), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(error) = &app.chat.error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(COLOR_ERROR),
            ))),
            area,
        );
    } else if app.chat.is_finalized() {
        let mut spans = vec![Span::styled(
            "Goal created. ",
            Style::default().fg(COLOR_HEADER),
        )];
        if app.chat.goal_preview_id.is_some() {
            spans.push(Span::styled("[v]", Style::default().fg(COLOR_HEADER)));
            spans.push(Span::styled(
                " view the plan",
                Style::default().fg(COLOR_DIM),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let composing = app.chat.can_compose();
    let border_color = if composing { COLOR_HEADER } else { COLOR_BORDER };
    let input_border = Block::default()
        .borders(Borders::TOP)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(input_border, area);

    let field_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: 1,
    };

    if composing {
        render_text_field(
            frame,
            field_area,
            &app.chat.input,
            "Describe the goal you want to plan",
            true,
            app.tick_count,
        );
    } else {
        let hint = if app.chat.is_sending {
            "Waiting for the agent..."
        } else {
            "This conversation is complete."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(COLOR_DIM),
            ))),
            field_area,
        );
    }
}

fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("[Enter]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" send  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[PgUp/PgDn]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" scroll  ", Style::default().fg(COLOR_DIM)),
    ];
    if app.chat.goal_preview_id.is_some() {
        spans.push(Span::styled("[v]", Style::default().fg(COLOR_HEADER)));
        spans.push(Span::styled(" preview  ", Style::default().fg(COLOR_DIM)));
    }
    spans.push(Span::styled("[Esc]", Style::default().fg(COLOR_HEADER)));
    spans.push(Span::styled(" back", Style::default().fg(COLOR_DIM)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Greedy word wrap on display width; long unbroken words are split hard.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    use unicode_width::UnicodeWidthChar;

    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;
        for word in raw_line.split_whitespace() {
            let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();
            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if word_width > width {
                // Hard-split a word wider than the window
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if current_width + w > width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += w;
                }
                continue;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
