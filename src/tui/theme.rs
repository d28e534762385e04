//! TUI color semantics and style constants.
//!
//! Tones map onto the same palette the badges use in the mockups:
//! - Green: success, active, primary buttons
//! - Yellow: warning, needs review
//! - Red: danger
//! - Cyan: info, keybinding hints, the selected tab
//! - Dim: neutral and de-emphasized text

use ratatui::style::{Color, Modifier, Style};

use crate::types::Tone;

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

pub const STYLE_SUCCESS: Style = Style::new().fg(Color::Green);

pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

pub const STYLE_INFO: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Header bar.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Brand mark ("LR").
pub const STYLE_BRAND: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Green)
    .add_modifier(Modifier::BOLD);

/// Highlighted tab in the tab bar.
pub const STYLE_TAB_ACTIVE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

pub const STYLE_TAB_INACTIVE: Style = Style::new().fg(Color::DarkGray);

/// Keybinding hints.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// Outlined button.
pub const STYLE_BUTTON: Style = Style::new().fg(Color::White);

/// Filled button.
pub const STYLE_BUTTON_PRIMARY: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Button under the focus cursor.
pub const STYLE_FOCUSED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Progress bar fill.
pub const STYLE_PROGRESS: Style = Style::new().fg(Color::Green);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Style for a badge or stat tone.
pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Success => STYLE_SUCCESS,
        Tone::Warning => STYLE_WARNING,
        Tone::Danger => STYLE_DANGER,
        Tone::Info => STYLE_INFO,
        Tone::Neutral => STYLE_DIM,
    }
}

// ============================================================================
// TESTS
// ============================================================================
