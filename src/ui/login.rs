//! Sign-in screen: paste a Google ID token to start a session.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::App;

use super::helpers::{render_text_field, spinner_frame};
use super::home::STRIDE_LOGO;
use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_NOTICE};

pub fn render_login_screen(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, area);

    let inner = area.inner(Margin::new(2, 1));

    // Logo at top
    let logo_area = Rect::new(inner.x, inner.y, inner.width, 6);
    let logo = Paragraph::new(STRIDE_LOGO.join("\n"))
        .style(Style::default().fg(COLOR_HEADER))
        .alignment(Alignment::Center);
    frame.render_widget(logo, logo_area);

    // Sign-in dialog
    let dialog_area = Rect::new(
        inner.x + 4,
        inner.y + 8,
        inner.width.saturating_sub(8),
        9,
    );
    let dialog_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Sign in ");
    let dialog_inner = dialog_area.inner(Margin::new(2, 1));
    frame.render_widget(dialog_block, dialog_area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(notice) = &app.login.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(COLOR_NOTICE),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Paste a Google ID token and press Enter.",
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines.push(Line::from(""));
    let intro = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(intro, dialog_inner);

    // Token input on its own row under the intro
    let field_area = Rect::new(
        dialog_inner.x,
        dialog_inner.y + 2,
        dialog_inner.width,
        1,
    );
    render_text_field(
        frame,
        field_area,
        &app.login.input,
        "ID token",
        !app.login.is_loading,
        app.tick_count,
    );

    // Status line: spinner while exchanging, error when it failed
    let status_area = Rect::new(
        dialog_inner.x,
        dialog_inner.y + 4,
        dialog_inner.width,
        1,
    );
    if app.login.is_loading {
        let status = Line::from(vec![
            Span::styled(spinner_frame(app.tick_count), Style::default().fg(COLOR_HEADER)),
            Span::styled(" Signing in...", Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(status), status_area);
    } else if let Some(error) = &app.login.error {
        let status = Line::from(Span::styled(
            error.clone(),
            Style::default().fg(COLOR_ERROR),
        ));
        frame.render_widget(Paragraph::new(status), status_area);
    }

    // Keybind hints at the bottom of the dialog
    let hints_area = Rect::new(
        dialog_inner.x,
        dialog_inner.y + 6,
        dialog_inner.width,
        1,
    );
    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" sign in  ", Style::default().fg(COLOR_DIM)),
        Span::styled("[Ctrl+C]", Style::default().fg(COLOR_HEADER)),
        Span::styled(" quit", Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(hints), hints_area);
}
