//! Dashboard screen: the day's tasks grouped by date plus active goals.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::state::HomeFocus;

use super::helpers::{goal_color, inner_rect, progress_bar, spinner_frame, truncate_string};
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_DONE, COLOR_ERROR, COLOR_HEADER, COLOR_NOTICE,
    COLOR_PENDING, COLOR_PROGRESS, COLOR_PROGRESS_BG,
};

pub const STRIDE_LOGO: &[&str] = &[
    "███████╗████████╗██████╗ ██╗██████╗ ███████╗",
    "██╔════╝╚══██╔══╝██╔══██╗██║██╔══██╗██╔════╝",
    "███████╗   ██║   ██████╔╝██║██║  ██║█████╗  ",
    "╚════██║   ██║   ██╔══██╗██║██║  ██║██╔══╝  ",
    "███████║   ██║   ██║  ██║██║██████╔╝███████╗",
    "╚══════╝   ╚═╝   ╚═╝  ╚═╝╚═╝╚═════╝ ╚══════╝",
];

pub fn render_home_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer, area);
    let inner = inner_rect(area, 1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Header: logo + day
            Constraint::Min(5),    // Columns
            Constraint::Length(1), // Undo banner / hints
        ])
        .split(inner);

    render_header(frame, chunks[0], app);
    render_columns(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let logo_width = STRIDE_LOGO[0].chars().count() as u16;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(logo_width + 2), Constraint::Min(10)])
        .split(area);

    let logo_lines: Vec<Line> = STRIDE_LOGO
        .iter()
        .map(|line| Line::from(Span::styled(*line, Style::default().fg(COLOR_HEADER))))
        .collect();
    frame.render_widget(Paragraph::new(logo_lines), columns[0]);

    let mut info = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Plan for ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                app.home.day.format("%A, %-d %B").to_string(),
                Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    if app.home.is_loading {
        info.push(Line::from(vec![
            Span::styled(spinner_frame(app.tick_count), Style::default().fg(COLOR_HEADER)),
            Span::styled(" Refreshing...", Style::default().fg(COLOR_DIM)),
        ]));
    } else if let Some(error) = &app.home.error {
        info.push(Line::from(Span::styled(
            truncate_string(error, area.width.saturating_sub(2) as usize),
            Style::default().fg(COLOR_ERROR),
        )));
    } else {
        let open: usize = app
            .home
            .task_groups
            .iter()
            .flat_map(|g| &g.tasks)
            .filter(|t| !t.done)
            .count();
        info.push(Line::from(Span::styled(
            format!("{} open task{}", open, if open == 1 { "" } else { "s" }),
            Style::default().fg(COLOR_DIM),
        )));
    }

    frame.render_widget(Paragraph::new(info), columns[1]);
}

fn render_columns(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_task_column(frame, columns[0], app, app.home.focus == HomeFocus::Tasks);
    render_goal_column(frame, columns[1], app, app.home.focus == HomeFocus::Goals);
}

fn render_task_column(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let border_color = if focused { COLOR_ACCENT } else { COLOR_DIM };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(border_color))
        .title(if focused { " TASKS ◄ " } else { " TASKS " });
    frame.render_widget(block, area);
    let inner = inner_rect(area, 1);

    if app.home.task_groups.is_empty() {
        let empty = if app.home.is_loading {
            ""
        } else {
            "Nothing scheduled for this day."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(empty, Style::default().fg(COLOR_DIM)))),
            inner,
        );
        return;
    }

    // Rows of the group/task list, with the flat task index threaded through
    // so selection matches the navigation order
    let mut lines: Vec<Line> = Vec::new();
    let mut flat = 0usize;
    let mut selected_line = 0usize;
    for group in &app.home.task_groups {
        lines.push(Line::from(Span::styled(
            group.label.clone(),
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::BOLD),
        )));
        for task in &group.tasks {
            let is_selected = focused && flat == app.home.selected_task;
            if is_selected {
                selected_line = lines.len();
            }
            let marker = if is_selected { "▶ " } else { "  " };
            let (check, check_color) = if task.done {
                ("[x] ", COLOR_DONE)
            } else {
                ("[ ] ", COLOR_PENDING)
            };
            let title_style = if task.done {
                Style::default().fg(COLOR_DIM).add_modifier(Modifier::CROSSED_OUT)
            } else if is_selected {
                Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(COLOR_ACCENT)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(COLOR_HEADER)),
                Span::styled(check, Style::default().fg(check_color)),
                Span::styled(
                    truncate_string(&task.title, inner.width.saturating_sub(8) as usize),
                    title_style,
                ),
            ]));
            flat += 1;
        }
    }

    // Scroll so the selected row stays in view
    let visible = inner.height as usize;
    let first = selected_line.saturating_sub(visible.saturating_sub(1));
    let window: Vec<Line> = lines.into_iter().skip(first).take(visible).collect();
    frame.render_widget(Paragraph::new(window), inner);
}

fn render_goal_column(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let border_color = if focused { COLOR_ACCENT } else { COLOR_DIM };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(border_color))
        .title(if focused { " GOALS ◄ " } else { " GOALS " });
    frame.render_widget(block, area);
    let inner = inner_rect(area, 1);

    if app.home.goals.is_empty() {
        let empty = if app.home.is_loading {
            ""
        } else {
            "No active goals. Press [c] to plan one."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(empty, Style::default().fg(COLOR_DIM)))),
            inner,
        );
        return;
    }

    let bar_width = inner.width.saturating_sub(12).max(4) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, goal) in app.home.goals.iter().enumerate() {
        let is_selected = focused && i == app.home.selected_goal;
        let marker = if is_selected { "▶ " } else { "  " };
        let title_style = if is_selected {
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(COLOR_HEADER)),
            Span::styled("▎", Style::default().fg(goal_color(goal.color))),
            Span::styled(
                truncate_string(&goal.title, inner.width.saturating_sub(10) as usize),
                title_style,
            ),
            Span::styled(
                format!("  P{}", goal.priority),
                Style::default().fg(COLOR_DIM),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(
                progress_bar(goal.progress, bar_width),
                Style::default().fg(COLOR_PROGRESS).bg(COLOR_PROGRESS_BG),
            ),
            Span::styled(
                format!(" {:>3.0}%", goal.progress * 100.0),
                Style::default().fg(COLOR_DIM),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let visible = inner.height as usize;
    let selected_line = app.home.selected_goal * 3;
    let first = selected_line.saturating_sub(visible.saturating_sub(1));
    let window: Vec<Line> = lines.into_iter().skip(first).take(visible).collect();
    frame.render_widget(Paragraph::new(window), inner);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(pending) = &app.home.pending_toggle {
        // One tick is 16ms, so ~62 ticks per second
        let seconds = pending.ticks_left.div_ceil(62);
        let verb = if pending.done { "done" } else { "not done" };
        let banner = Line::from(vec![
            Span::styled(
                format!("Marked '{}' {}", truncate_string(&pending.title, 30), verb),
                Style::default().fg(COLOR_NOTICE),
            ),
            Span::styled("  [u]", Style::default().fg(COLOR_HEADER)),
            Span::styled(
                format!(" undo ({}s)", seconds),
                Style::default().fg(COLOR_DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(banner), area);
        return;
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" column  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[j/k]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" move  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[Enter]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" open  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[Space]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" toggle  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[c]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" chat  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[p]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" profile  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[r]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" refresh  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[q]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" quit", Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}
