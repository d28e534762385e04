//! TUI state algebra: pure types, zero effects.
//!
//! Navigation state lives in the [`Shell`]; the TUI adds only what the
//! terminal needs on top of it (button focus, the sign-in form's toggle,
//! a status message, extra scroll past the focused line).

use crossterm::event::KeyEvent;

use crate::registry::{ActionOutcome, ScreenRegistry};
use crate::shell::{Displayed, Nav, Shell};
use crate::types::{ActionId, SessionConfig};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Session navigation state.
    pub shell: Shell,

    /// Index into the buttons of the current screen.
    pub focus: usize,

    /// Lines scrolled beyond what keeps the focused button in view.
    /// Reset whenever focus or route changes.
    pub scroll: usize,

    /// "Remember me" on the sign-in form. Cosmetic; nothing is remembered.
    pub remember_me: bool,

    /// One-line message shown above the help line.
    pub status: Option<String>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Focus the previous button.
    MoveUp,
    /// Focus the next button, or scroll once past the last one.
    MoveDown,
    PageUp,
    PageDown,
    NextTab,
    PrevTab,
    /// Number key: role choice on welcome, tab choice in a shell.
    NumberKey(u8),
    /// Sign in, or press the focused button.
    Enter,
    Back,
    /// Flip "Remember me" on the sign-in form.
    ToggleRemember,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Nothing to do.
    Stay,
    /// Hand a navigation request to the shell.
    Navigate(Nav),
    /// Move button focus.
    Focus(usize),
    /// Set the extra scroll offset.
    Scroll(usize),
    ToggleRemember,
    Quit,
    /// Execute a side effect.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Press a panel button.
    Invoke(ActionId),
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// App at the welcome screen.
    pub fn new(config: SessionConfig, registry: ScreenRegistry) -> Self {
        Self::with_shell(Shell::new(config, registry))
    }

    /// App entered at a web path.
    pub fn at_path(config: SessionConfig, registry: ScreenRegistry, path: &str) -> Self {
        Self::with_shell(Shell::at_path(config, registry, path))
    }

    pub fn with_shell(shell: Shell) -> Self {
        App {
            shell,
            focus: 0,
            scroll: 0,
            remember_me: true,
            status: None,
            should_quit: false,
        }
    }

    /// Actions of the buttons on the current screen, in focus order.
    ///
    /// The sign-in form's affordances are listed here too so they can be
    /// focused and pressed like panel buttons.
    pub fn focusable(&self) -> Vec<ActionId> {
        match self.shell.displayed() {
            Displayed::Welcome => Vec::new(),
            Displayed::SignIn(role) => vec![
                ActionId::SignIn { role },
                ActionId::ForgotPassword,
                ActionId::CreateAccount,
            ],
            Displayed::Shell(panel) => panel
                .buttons()
                .into_iter()
                .map(|b| b.action.clone())
                .collect(),
        }
    }

    /// Status line text for an invoked action.
    pub fn describe_outcome(action: &ActionId, outcome: ActionOutcome) -> String {
        match outcome {
            ActionOutcome::Inert => format!("{} is not connected yet", action_label(action)),
            ActionOutcome::Handled => format!("{} done", action_label(action)),
        }
    }
}

/// Short human name for an action, used in status messages.
pub fn action_label(action: &ActionId) -> String {
    match action {
        ActionId::SignIn { role } => format!("{} sign-in", role.label()),
        ActionId::ForgotPassword => "Password reset".into(),
        ActionId::CreateAccount => "Account creation".into(),
        ActionId::ExploreMap => "Map".into(),
        ActionId::AddPatient => "Add patient".into(),
        ActionId::FindTherapist => "Therapist search".into(),
        ActionId::InviteTherapist => "Invite".into(),
        ActionId::Filter { screen } => format!("{} filter", screen.label()),
        ActionId::Message { name } => format!("Messaging {}", name),
        ActionId::ViewDetails { name } => format!("Details for {}", name),
        ActionId::ViewProfile { name } => format!("Profile of {}", name),
        ActionId::ProcessPayroll => "Payroll processing".into(),
        ActionId::EditAvailability => "Availability editing".into(),
        ActionId::AcceptRequest { id } => format!("Accepting request #{}", id),
        ActionId::DeclineRequest { id } => format!("Declining request #{}", id),
        ActionId::AddMedication => "Add medication".into(),
        ActionId::EditMedication { name } => format!("Editing {}", name),
        ActionId::EditProfile => "Profile editing".into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, ScreenKey};

    fn app() -> App {
        App::new(SessionConfig::default(), ScreenRegistry::default())
    }

    #[test]
    fn app_starts_at_welcome_with_remember_me_on() {
        let app = app();
        assert_eq!(app.shell.displayed(), Displayed::Welcome);
        assert!(app.remember_me);
        assert_eq!(app.focus, 0);
        assert_eq!(app.scroll, 0);
        assert!(app.status.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn welcome_has_nothing_to_focus() {
        assert!(app().focusable().is_empty());
    }

    #[test]
    fn sign_in_form_focus_starts_with_sign_in_button() {
        let mut app = app();
        app.shell.apply(Nav::SelectRole(Role::Clinic)).unwrap();
        assert_eq!(
            app.focusable()[0],
            ActionId::SignIn { role: Role::Clinic }
        );
    }

    #[test]
    fn shell_focus_follows_panel_buttons() {
        let mut app = app();
        app.shell.apply(Nav::SelectRole(Role::Therapist)).unwrap();
        app.shell.apply(Nav::ConfirmSignIn).unwrap();
        app.shell.apply(Nav::SelectTab(ScreenKey::Medications)).unwrap();
        let focusable = app.focusable();
        assert_eq!(focusable[0], ActionId::AddMedication);
        assert_eq!(focusable.len(), 4);
    }

    #[test]
    fn inert_outcome_message_names_the_action() {
        let msg = App::describe_outcome(&ActionId::AcceptRequest { id: 2 }, ActionOutcome::Inert);
        assert_eq!(msg, "Accepting request #2 is not connected yet");
    }

    #[test]
    fn transition_variants_are_distinguishable() {
        let t1 = Transition::Navigate(Nav::GoBack);
        let t2 = Transition::Quit;
        let t3 = Transition::Effect(Effect::Invoke(ActionId::ProcessPayroll));
        assert_ne!(t1, t2);
        assert_ne!(t2, t3);
    }
}
