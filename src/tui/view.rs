//! Pure rendering: map App state to ratatui widget trees.
//!
//! `render()` draws the persistent frame (header, tab bar, status and
//! help lines) and dispatches the body on what the shell displays.
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() writing to the terminal buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs, Wrap};

use crate::registry::{Badge, Block, Button, Panel, bar_width};
use crate::shell::Displayed;
use crate::tabs::TabState;
use crate::types::{Role, Variant};

use super::state::App;
use super::theme;

/// Width of progress bars, in cells.
const BAR_WIDTH: usize = 30;

/// Label column width for stats, info rows and bars.
const LABEL_WIDTH: usize = 18;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let displayed = app.shell.displayed();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(1), // tab bar
        Constraint::Min(0),    // content
        Constraint::Length(1), // status
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(app, &displayed), chunks[0]);

    if let Some(tabs) = app.shell.tabs() {
        frame.render_widget(render_tabs(tabs), chunks[1]);
    }

    let status = app.status.clone().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(status, theme::STYLE_INFO)),
        chunks[3],
    );
    frame.render_widget(render_help(app.shell.variant(), &displayed), chunks[4]);

    let content_area = chunks[2];
    match &displayed {
        Displayed::Welcome => render_welcome(app.shell.variant(), frame, content_area),
        Displayed::SignIn(role) => {
            let (lines, focus_line) = sign_in_lines(*role, app.remember_me, app.focus);
            render_scrolled(lines, focus_line, app.scroll, frame, content_area);
        }
        Displayed::Shell(panel) => {
            let (lines, focus_line) = panel_lines(panel, app.focus);
            render_scrolled(lines, focus_line, app.scroll, frame, content_area);
        }
    }
}

/// Draw lines, scrolled far enough to keep the focused line visible plus
/// `extra` lines, never past the last line.
fn render_scrolled(
    lines: Vec<Line<'static>>,
    focus_line: Option<usize>,
    extra: usize,
    frame: &mut Frame,
    area: Rect,
) {
    let visible_height = area.height as usize;
    let max_offset = lines.len().saturating_sub(visible_height);
    let focus_offset = match focus_line {
        Some(line) if visible_height > 0 && line >= visible_height => line - visible_height + 1,
        _ => 0,
    };
    let scroll_offset = (focus_offset + extra).min(max_offset);
    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Number of lines below the focused line (below the first line when
/// nothing is focused). Bounds how far the user can scroll.
pub fn lines_after_focus(app: &App) -> usize {
    let (lines, focus_line) = match app.shell.displayed() {
        Displayed::Welcome => return 0,
        Displayed::SignIn(role) => sign_in_lines(role, app.remember_me, app.focus),
        Displayed::Shell(panel) => panel_lines(&panel, app.focus),
    };
    lines.len().saturating_sub(focus_line.unwrap_or(0) + 1)
}

// ============================================================================
// SHARED FRAME
// ============================================================================

/// Header bar: screen title, plus the current path in the web variant.
fn render_title(app: &App, displayed: &Displayed) -> Paragraph<'static> {
    let title = match displayed {
        Displayed::Welcome => "Healthcare Connect Platform".to_string(),
        Displayed::SignIn(role) => format!("← {} Portal", role.label()),
        Displayed::Shell(_) => "LUMINOUS REHAB".to_string(),
    };

    let mut spans = vec![Span::styled(title, theme::STYLE_TITLE)];
    if app.shell.variant() == Variant::Web {
        spans.push(Span::styled(
            format!("   {}", app.shell.route().path()),
            theme::STYLE_DIM,
        ));
    }
    Paragraph::new(Line::from(spans))
}

/// Tab bar for the active role shell.
fn render_tabs(tabs: &TabState) -> Tabs<'static> {
    let titles: Vec<Line<'static>> = tabs
        .role()
        .screens()
        .iter()
        .enumerate()
        .map(|(i, key)| Line::from(format!("{} {}", i + 1, key.label())))
        .collect();

    Tabs::new(titles)
        .select(tabs.index())
        .style(theme::STYLE_TAB_INACTIVE)
        .highlight_style(theme::STYLE_TAB_ACTIVE)
        .divider(" | ")
}

/// Help line showing available keybindings for the current screen.
fn render_help(variant: Variant, displayed: &Displayed) -> Paragraph<'static> {
    let help_text = match (displayed, variant) {
        (Displayed::Welcome, Variant::Mobile) => "[1] clinic  [2] therapist  [q] quit",
        (Displayed::Welcome, Variant::Web) => "[1] /clinic  [2] /therapist  [q] quit",
        (Displayed::SignIn(_), _) => {
            "[Enter] select  [j/k] move  [r] remember me  [Esc] back  [q] quit"
        }
        (Displayed::Shell(_), Variant::Mobile) => {
            "[1-5] tab  [←/→] switch  [j/k] move  [PgUp/PgDn] page  [Enter] press  [q] quit"
        }
        (Displayed::Shell(_), Variant::Web) => {
            "[1-5] tab  [←/→] switch  [j/k] move  [Enter] press  [Esc] home  [q] quit"
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: WELCOME
// ============================================================================

fn render_welcome(variant: Variant, frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(welcome_lines(variant)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn welcome_lines(variant: Variant) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(" LR ", theme::STYLE_BRAND),
            Span::styled(" Luminous Rehab", theme::STYLE_IMPORTANT),
        ]),
        Line::from(Span::styled(
            "  Streamlining rehabilitation care through smart connections.",
            theme::STYLE_DIM,
        )),
        Line::from(""),
        Line::from("  Welcome back! Select your role to continue"),
        Line::from(""),
    ];

    let roles = [
        (Role::Clinic, "Clinic Manager", "Manage your facility, staff, and patient care."),
        (Role::Therapist, "Therapist", "Access your schedule and patient information."),
    ];
    for (i, (role, name, blurb)) in roles.into_iter().enumerate() {
        let mut heading = vec![
            Span::styled(format!("  [{}] ", i + 1), theme::STYLE_INTERACTIVE),
            Span::styled(name, theme::STYLE_IMPORTANT),
        ];
        if variant == Variant::Web {
            heading.push(Span::styled(format!("  → /{}", role.as_str()), theme::STYLE_DIM));
        }
        lines.push(Line::from(heading));
        lines.push(Line::from(Span::styled(format!("      {}", blurb), theme::STYLE_DIM)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  ✓ Secure & HIPAA Compliant",
        theme::STYLE_SUCCESS,
    )));
    lines.push(Line::from(Span::styled(
        "    Your patient data is protected with industry-leading security.",
        theme::STYLE_DIM,
    )));
    lines
}

// ============================================================================
// SCREEN: SIGN-IN
// ============================================================================

/// Sign-in form. Focus order: Sign In, Forgot password, Create account.
///
/// Returns the lines and the index of the focused line.
fn sign_in_lines(role: Role, remember_me: bool, focus: usize) -> (Vec<Line<'static>>, Option<usize>) {
    let checkbox = if remember_me { "[x]" } else { "[ ]" };
    let mut lines = vec![
        Line::from(""),
        Line::from("  Welcome back! Sign in to continue"),
        Line::from(""),
        Line::from(Span::styled("  Email Address", theme::STYLE_DIM)),
        Line::from(format!("  [ {}@example.com ]", role.as_str())),
        Line::from(Span::styled("  Password", theme::STYLE_DIM)),
        Line::from("  [ •••••••• ]"),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} ", checkbox), theme::STYLE_SUCCESS),
            Span::raw("Remember me"),
        ]),
    ];

    let focus_line = lines.len() + match focus {
        0 => 2,
        1 => 0,
        _ => 4,
    };

    lines.push(Line::from(vec![
        Span::raw("  "),
        button_span("Forgot password?", false, focus == 1),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        button_span("Sign In", true, focus == 0),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  New to Luminous Rehab? ", theme::STYLE_DIM),
        button_span("Create an account", false, focus == 2),
    ]));

    (lines, Some(focus_line))
}

// ============================================================================
// SCREEN: ROLE SHELL PANELS
// ============================================================================

fn button_span(label: &str, primary: bool, focused: bool) -> Span<'static> {
    let style = if focused {
        theme::STYLE_FOCUSED
    } else if primary {
        theme::STYLE_BUTTON_PRIMARY
    } else {
        theme::STYLE_BUTTON
    };
    Span::styled(format!("[ {} ]", label), style)
}

fn badge_span(badge: &Badge) -> Span<'static> {
    Span::styled(format!(" [{}]", badge.text), theme::tone_style(badge.tone))
}

/// Walks a panel's buttons in the same order as `Panel::buttons`.
struct ButtonCursor {
    next: usize,
    focus: usize,
    focus_line: Option<usize>,
}

impl ButtonCursor {
    /// Spans for `buttons` placed on line `line`.
    fn spans(&mut self, buttons: &[Button], line: usize) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for button in buttons {
            let focused = self.next == self.focus;
            if focused {
                self.focus_line = Some(line);
            }
            spans.push(Span::raw(" "));
            spans.push(button_span(&button.label, button.primary, focused));
            self.next += 1;
        }
        spans
    }
}

/// Lines for a panel, and the index of the line holding the focused button.
pub fn panel_lines(panel: &Panel, focus: usize) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut cursor = ButtonCursor {
        next: 0,
        focus,
        focus_line: None,
    };

    for block in &panel.blocks {
        match block {
            Block::Heading { text, badge, actions } => {
                lines.push(Line::from(""));
                let mut spans = vec![Span::styled(format!("  {}", text), theme::STYLE_IMPORTANT)];
                if let Some(badge) = badge {
                    spans.push(badge_span(badge));
                }
                spans.extend(cursor.spans(actions, lines.len()));
                lines.push(Line::from(spans));
            }
            Block::Stats { stats } => {
                for stat in stats {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<LABEL_WIDTH$}", stat.label), theme::STYLE_DIM),
                        Span::styled(
                            stat.display(),
                            theme::tone_style(stat.tone).patch(theme::STYLE_IMPORTANT),
                        ),
                    ]));
                }
            }
            Block::Search { placeholder } => {
                lines.push(Line::from(Span::styled(
                    format!("  [ {} ]", placeholder),
                    theme::STYLE_DIM,
                )));
            }
            Block::Rows { rows } => {
                for row in rows {
                    lines.push(Line::from(""));
                    let mut spans = vec![Span::raw("  ")];
                    if let Some(initials) = &row.initials {
                        spans.push(Span::styled(format!("({}) ", initials), theme::STYLE_INFO));
                    }
                    spans.push(Span::styled(row.title.clone(), theme::STYLE_IMPORTANT));
                    spans.extend(row.badges.iter().map(badge_span));
                    lines.push(Line::from(spans));

                    for detail in &row.details {
                        lines.push(Line::from(Span::styled(
                            format!("       {}", detail),
                            theme::STYLE_DIM,
                        )));
                    }
                    if !row.actions.is_empty() {
                        let mut spans = vec![Span::raw("      ")];
                        spans.extend(cursor.spans(&row.actions, lines.len()));
                        lines.push(Line::from(spans));
                    }
                }
            }
            Block::Progress { label, percent } => {
                let filled = bar_width(*percent, BAR_WIDTH);
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<LABEL_WIDTH$}", label)),
                    Span::styled("█".repeat(filled), theme::STYLE_PROGRESS),
                    Span::styled("░".repeat(BAR_WIDTH - filled), theme::STYLE_DIM),
                    Span::styled(format!(" {}%", percent), theme::STYLE_DIM),
                ]));
            }
            Block::Info { pairs } => {
                for (label, value) in pairs {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<LABEL_WIDTH$}", label), theme::STYLE_DIM),
                        Span::styled(value.clone(), theme::STYLE_IMPORTANT),
                    ]));
                }
            }
            Block::Figure { caption, value, footnote } => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(format!("  {}", caption), theme::STYLE_DIM)));
                lines.push(Line::from(Span::styled(
                    format!("  {}", value),
                    theme::STYLE_TITLE,
                )));
                lines.push(Line::from(Span::styled(format!("  {}", footnote), theme::STYLE_DIM)));
            }
            Block::Note { title, meta, tone } => {
                lines.push(Line::from(vec![
                    Span::styled("  ● ", theme::tone_style(*tone)),
                    Span::raw(title.clone()),
                    Span::styled(format!("  {}", meta), theme::STYLE_DIM),
                ]));
            }
            Block::Placeholder { text } => {
                lines.push(Line::from(Span::styled(format!("  ( {} )", text), theme::STYLE_DIM)));
            }
            Block::Actions { buttons } => {
                let mut spans = vec![Span::raw(" ")];
                spans.extend(cursor.spans(buttons, lines.len()));
                lines.push(Line::from(spans));
            }
        }
    }

    (lines, cursor.focus_line)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ScreenRegistry;
    use crate::shell::Nav;
    use crate::types::{ScreenKey, SessionConfig};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(width, height)).unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = make_terminal(width, height);
        terminal.draw(|frame| render(app, frame)).unwrap();
        buffer_text(&terminal)
    }

    fn mobile() -> App {
        App::new(SessionConfig::default(), ScreenRegistry::default())
    }

    fn web(path: &str) -> App {
        let config = SessionConfig {
            variant: Variant::Web,
            ..SessionConfig::default()
        };
        App::at_path(config, ScreenRegistry::default(), path)
    }

    #[test]
    fn welcome_renders_role_choices() {
        let content = draw(&mobile(), 80, 24);
        assert!(content.contains("Healthcare Connect Platform"));
        assert!(content.contains("Clinic Manager"));
        assert!(content.contains("Therapist"));
        assert!(content.contains("HIPAA"));
    }

    #[test]
    fn web_welcome_shows_paths() {
        let content = draw(&web("/"), 80, 24);
        assert!(content.contains("→ /clinic"));
        assert!(content.contains("[1] /clinic"));
    }

    #[test]
    fn sign_in_shows_portal_and_remember_me() {
        let mut app = mobile();
        app.shell.apply(Nav::SelectRole(Role::Clinic)).unwrap();
        let content = draw(&app, 80, 24);
        assert!(content.contains("Clinic Portal"));
        assert!(content.contains("clinic@example.com"));
        assert!(content.contains("[x] Remember me"));
        assert!(content.contains("[ Sign In ]"));

        app.remember_me = false;
        let content = draw(&app, 80, 24);
        assert!(content.contains("[ ] Remember me"));
    }

    #[test]
    fn web_clinic_dashboard_shows_stats_and_tabs() {
        let content = draw(&web("/clinic"), 80, 24);
        assert!(content.contains("LUMINOUS REHAB"));
        assert!(content.contains("/clinic"));
        assert!(content.contains("1 Dashboard"));
        assert!(content.contains("4 Payroll"));
        assert!(content.contains("28 / 40"));
        assert!(content.contains("45 available"));
        assert!(content.contains("12 pending"));
    }

    #[test]
    fn therapist_medications_render_in_order() {
        let mut app = web("/therapist");
        app.shell.apply(Nav::SelectTab(ScreenKey::Medications)).unwrap();
        let content = draw(&app, 80, 24);
        let l = content.find("Lisinopril").unwrap();
        let m = content.find("Metformin").unwrap();
        let a = content.find("Atorvastatin").unwrap();
        assert!(l < m && m < a);
    }

    #[test]
    fn status_message_is_drawn() {
        let mut app = web("/therapist");
        app.status = Some("Accepting request #1 is not connected yet".into());
        let content = draw(&app, 80, 24);
        assert!(content.contains("not connected yet"));
    }

    #[test]
    fn focused_button_scrolls_into_view() {
        let mut app = web("/clinic");
        app.shell.apply(Nav::SelectTab(ScreenKey::Patients)).unwrap();
        // Last button is the final patient's View Details.
        app.focus = app.focusable().len() - 1;
        let content = draw(&app, 80, 10);
        assert!(content.contains("View Details"));
        assert!(!content.contains("Current Patients"));
    }

    #[test]
    fn content_below_last_button_scrolls_into_view() {
        use crate::tui::state::Action;
        use crate::tui::update::{apply, update};

        let mut app = web("/clinic");
        app.shell.apply(Nav::SelectTab(ScreenKey::Payroll)).unwrap();
        assert_eq!(app.focusable().len(), 1);

        let content = draw(&app, 80, 12);
        assert!(content.contains("Process"));
        assert!(!content.contains("Pending payment approval needed"));

        for _ in 0..lines_after_focus(&app) {
            let transition = update(&app, &Action::MoveDown);
            apply(&mut app, transition);
        }
        let content = draw(&app, 80, 12);
        assert!(content.contains("Pending payment approval needed"));
    }

    #[test]
    fn extra_scroll_never_passes_the_last_line() {
        let mut app = web("/therapist");
        app.scroll = 500;
        let content = draw(&app, 80, 12);
        // Friday is the last availability bar.
        assert!(content.contains("Friday"));
    }

    #[test]
    fn panel_focus_line_points_at_button_row() {
        let panel = ScreenRegistry::default()
            .render(Role::Therapist, ScreenKey::Medications)
            .unwrap();
        let (lines, focus_line) = panel_lines(&panel, 1);
        let line = focus_line.unwrap();
        let text: String = lines[line].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("[ Edit ]"));
        // Unknown focus index leaves nothing focused.
        assert_eq!(panel_lines(&panel, 99).1, None);
    }

    #[test]
    fn every_screen_renders_without_panic() {
        let mut terminal = make_terminal(60, 20);
        for role in Role::ALL {
            for &key in role.screens() {
                let mut app = web(&format!("/{}", role.as_str()));
                app.shell.apply(Nav::SelectTab(key)).unwrap();
                terminal
                    .draw(|frame| render(&app, frame))
                    .expect("every screen should render without panic");
            }
        }
        let mut app = mobile();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        app.shell.apply(Nav::SelectRole(Role::Therapist)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = web("/therapist");
        let mut terminal = make_terminal(10, 3);
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }
}
