//! Helper functions and constants for UI rendering
//!
//! Contains utility functions for formatting, truncation, and common UI patterns.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::widgets::TextField;

use super::theme::{COLOR_ACCENT, COLOR_DIM};

/// Spinner frames for loading animation
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The spinner frame for a given loop tick.
pub fn spinner_frame(tick_count: u64) -> &'static str {
    SPINNER_FRAMES[(tick_count / 2) as usize % SPINNER_FRAMES.len()]
}

/// Get inner rect with margin
pub fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

/// Truncate a string to approximately max_len bytes, adding "..." if truncated.
/// Safely handles UTF-8 by finding the nearest char boundary.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let end = find_char_boundary(s, target);
        format!("{}...", &s[..end])
    }
}

/// Find the nearest valid UTF-8 char boundary at or before the given byte index.
pub fn find_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut end = index;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Terminal color for a goal's packed 0xAARRGGBB accent.
pub fn goal_color(packed: i64) -> Color {
    let r = ((packed >> 16) & 0xFF) as u8;
    let g = ((packed >> 8) & 0xFF) as u8;
    let b = (packed & 0xFF) as u8;
    Color::Rgb(r, g, b)
}

/// Progress bar string of `width` cells, filled proportionally to `fraction`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

/// Render a single-line text field with a blinking block cursor.
///
/// The window scrolls horizontally so the cursor stays visible. When the
/// field is empty and unfocused the placeholder is shown dimmed.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    field: &TextField,
    placeholder: &str,
    focused: bool,
    tick_count: u64,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    if field.is_empty() && !focused {
        let hint = Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(COLOR_DIM),
        ));
        frame.render_widget(ratatui::widgets::Paragraph::new(hint), area);
        return;
    }

    let (window, cursor_col) = field.visible_window(area.width.saturating_sub(1) as usize);
    let show_cursor = focused && (tick_count / 5).is_multiple_of(2);

    // Split the window at the cursor cell so the cursor can be drawn inline
    let mut before = String::new();
    let mut at_cursor: Option<char> = None;
    let mut after = String::new();
    let mut col = 0usize;
    for ch in window.chars() {
        if col < cursor_col {
            before.push(ch);
        } else if at_cursor.is_none() && focused {
            at_cursor = Some(ch);
        } else {
            after.push(ch);
        }
        col += ch.width().unwrap_or(0);
    }

    let mut spans = vec![Span::styled(before, Style::default().fg(COLOR_ACCENT))];
    if focused {
        match (at_cursor, show_cursor) {
            (Some(c), true) => spans.push(Span::styled(
                c.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            )),
            (Some(c), false) => {
                spans.push(Span::styled(c.to_string(), Style::default().fg(COLOR_ACCENT)))
            }
            (None, true) => spans.push(Span::styled("█", Style::default().fg(COLOR_ACCENT))),
            (None, false) => {}
        }
    }
    spans.push(Span::styled(after, Style::default().fg(COLOR_ACCENT)));

    frame.render_widget(ratatui::widgets::Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("test", 4), "test");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_string_utf8_boundary() {
        // Must not split the multi-byte bullet
        let s = "a\u{2022}b\u{2022}c";
        let out = truncate_string(s, 5);
        assert!(out.ends_with("..."));
        assert!(out.is_char_boundary(out.len()));
    }

    #[test]
    fn test_goal_color_unpacks_rgb() {
        assert_eq!(goal_color(0xFF336699), Color::Rgb(0x33, 0x66, 0x99));
        assert_eq!(goal_color(0xFF000000u32 as i64), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_progress_bar_proportions() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(1.0, 4), "████");
        // Out-of-range input is clamped
        assert_eq!(progress_bar(2.0, 4), "████");
    }

    #[test]
    fn test_spinner_frame_cycles() {
        assert_eq!(spinner_frame(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner_frame(2), SPINNER_FRAMES[1]);
        let full_cycle = 2 * SPINNER_FRAMES.len() as u64;
        assert_eq!(spinner_frame(full_cycle), SPINNER_FRAMES[0]);
    }
}
