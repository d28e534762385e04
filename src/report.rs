//! Panel formatting for the command line.
//!
//! Pure functions: (Panel, OutputFormat) → String.
//! No I/O, no side effects.

use crate::registry::{Badge, Block, Button, Panel, Row, bar_width};
use crate::types::{OutputFormat, Role};

/// Width of text progress bars, in cells.
const BAR_WIDTH: usize = 20;

/// Format a panel for output.
pub fn format_panel(panel: &Panel, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(panel),
        OutputFormat::Json => format_json(panel),
    }
}

/// One line per role listing its tab set in order.
pub fn format_screens(roles: &[Role]) -> String {
    let mut out = String::new();
    for role in roles {
        let keys: Vec<&str> = role.screens().iter().map(|k| k.as_str()).collect();
        out.push_str(&format!("{:<10} {}\n", role.as_str(), keys.join(", ")));
    }
    out
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(panel: &Panel) -> String {
    let mut out = format!(
        "=== {} / {} ===\n",
        panel.role.label(),
        panel.title
    );

    for block in &panel.blocks {
        match block {
            Block::Heading { text, badge, actions } => {
                out.push('\n');
                out.push_str(text);
                if let Some(badge) = badge {
                    out.push_str(&format!(" {}", badge_text(badge)));
                }
                if !actions.is_empty() {
                    out.push_str(&format!("  {}", buttons_text(actions)));
                }
                out.push('\n');
            }
            Block::Stats { stats } => {
                for stat in stats {
                    out.push_str(&format!("  {:<16} {}\n", stat.label, stat.display()));
                }
            }
            Block::Search { placeholder } => {
                out.push_str(&format!("  [ {} ]\n", placeholder));
            }
            Block::Rows { rows } => {
                for row in rows {
                    out.push_str(&row_text(row));
                }
            }
            Block::Progress { label, percent } => {
                let filled = bar_width(*percent, BAR_WIDTH);
                out.push_str(&format!(
                    "  {:<16} [{}{}] {}%\n",
                    label,
                    "█".repeat(filled),
                    "░".repeat(BAR_WIDTH - filled),
                    percent
                ));
            }
            Block::Info { pairs } => {
                for (label, value) in pairs {
                    out.push_str(&format!("  {:<16} {}\n", label, value));
                }
            }
            Block::Figure { caption, value, footnote } => {
                out.push_str(&format!("  {}\n  {}\n  {}\n", caption, value, footnote));
            }
            Block::Note { title, meta, .. } => {
                out.push_str(&format!("  • {} ({})\n", title, meta));
            }
            Block::Placeholder { text } => {
                out.push_str(&format!("  ({})\n", text));
            }
            Block::Actions { buttons } => {
                out.push_str(&format!("  {}\n", buttons_text(buttons)));
            }
        }
    }

    out
}

fn badge_text(badge: &Badge) -> String {
    format!("[{}]", badge.text)
}

fn buttons_text(buttons: &[Button]) -> String {
    buttons
        .iter()
        .map(|b| format!("<{}>", b.label))
        .collect::<Vec<_>>()
        .join(" ")
}

fn row_text(row: &Row) -> String {
    let mut out = String::from("  ");
    if let Some(initials) = &row.initials {
        out.push_str(&format!("({}) ", initials));
    }
    out.push_str(&row.title);
    for badge in &row.badges {
        out.push_str(&format!(" {}", badge_text(badge)));
    }
    out.push('\n');
    for detail in &row.details {
        out.push_str(&format!("      {}\n", detail));
    }
    if !row.actions.is_empty() {
        out.push_str(&format!("      {}\n", buttons_text(&row.actions)));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(panel: &Panel) -> String {
    serde_json::to_string_pretty(panel).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

// ============================================================================
// TESTS
// ============================================================================
