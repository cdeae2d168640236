//! Color theme constants for the Stride UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color - white for the logo
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Completed tasks and success marks - bright green
pub const COLOR_DONE: Color = Color::LightGreen;

/// Error banners and validation failures - red
pub const COLOR_ERROR: Color = Color::Red;

/// Agent-side chat messages - cyan
pub const COLOR_AGENT: Color = Color::Cyan;

/// User-side chat messages - white
pub const COLOR_USER: Color = Color::White;

/// Pending/neutral marks - gray
pub const COLOR_PENDING: Color = Color::Gray;

/// Progress bar fill color - white
pub const COLOR_PROGRESS: Color = Color::White;

/// Progress bar background
pub const COLOR_PROGRESS_BG: Color = Color::DarkGray;

/// Notices carried onto the sign-in screen - yellow
pub const COLOR_NOTICE: Color = Color::Yellow;
