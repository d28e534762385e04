//! Pure state transitions: (App, Action) → Transition.
//!
//! Each displayed screen defines which actions it accepts. Unhandled
//! actions are `Stay` (no-op). Applying a transition only touches the
//! in-memory App; button presses are handed back as effects.

use tracing::debug;

use crate::shell::{Displayed, Nav};
use crate::types::{ActionId, Role, Variant};

use super::state::{Action, App, Effect, Transition};
use super::view::lines_after_focus;

/// Lines moved by PageUp / PageDown.
const PAGE: usize = 10;

/// Pure state transition function.
pub fn update(app: &App, action: &Action) -> Transition {
    if *action == Action::Quit {
        return Transition::Quit;
    }

    match app.shell.displayed() {
        Displayed::Welcome => update_welcome(action),
        Displayed::SignIn(_) => update_sign_in(app, action),
        Displayed::Shell(_) => update_shell(app, action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Welcome: 1 and 2 pick a role.
fn update_welcome(action: &Action) -> Transition {
    match action {
        Action::NumberKey(1) => Transition::Navigate(Nav::SelectRole(Role::Clinic)),
        Action::NumberKey(2) => Transition::Navigate(Nav::SelectRole(Role::Therapist)),
        _ => Transition::Stay,
    }
}

/// Sign-in: Enter on "Sign In" completes the stub sign-in; the other
/// form links are inert buttons.
fn update_sign_in(app: &App, action: &Action) -> Transition {
    match action {
        Action::Enter => match app.focusable().into_iter().nth(app.focus) {
            Some(ActionId::SignIn { .. }) | None => Transition::Navigate(Nav::ConfirmSignIn),
            Some(other) => Transition::Effect(Effect::Invoke(other)),
        },
        Action::Back => Transition::Navigate(Nav::GoBack),
        Action::ToggleRemember => Transition::ToggleRemember,
        Action::MoveUp | Action::MoveDown | Action::PageUp | Action::PageDown => {
            move_focus(app, action)
        }
        _ => Transition::Stay,
    }
}

/// Role shell: tabs by number or cycling, button focus, press.
fn update_shell(app: &App, action: &Action) -> Transition {
    match action {
        // Tab bar numbers are 1-based; the shell rejects positions past the end.
        Action::NumberKey(n) => match (*n as usize).checked_sub(1) {
            Some(index) => Transition::Navigate(Nav::SelectTabAt(index)),
            None => Transition::Stay,
        },
        Action::NextTab => Transition::Navigate(Nav::NextTab),
        Action::PrevTab => Transition::Navigate(Nav::PreviousTab),
        Action::MoveUp | Action::MoveDown | Action::PageUp | Action::PageDown => {
            move_focus(app, action)
        }
        Action::Enter => match app.focusable().into_iter().nth(app.focus) {
            Some(pressed) => Transition::Effect(Effect::Invoke(pressed)),
            None => Transition::Stay,
        },
        // Only the web variant has somewhere to go back to from a shell.
        Action::Back if app.shell.variant() == Variant::Web => Transition::Navigate(Nav::GoBack),
        _ => Transition::Stay,
    }
}

/// Focus movement, clamped to the buttons on screen.
///
/// Moving down from the last button scrolls the rest of the screen into
/// view; moving up unwinds that scroll before focus moves again.
fn move_focus(app: &App, action: &Action) -> Transition {
    let len = app.focusable().len();
    match action {
        Action::MoveUp if app.scroll > 0 => scroll_to(app, app.scroll - 1),
        Action::MoveUp if len > 0 => Transition::Focus(app.focus.saturating_sub(1)),
        Action::MoveDown if app.focus + 1 < len => Transition::Focus(app.focus + 1),
        Action::MoveDown => scroll_to(app, app.scroll + 1),
        Action::PageDown => scroll_to(app, app.scroll + PAGE),
        Action::PageUp => scroll_to(app, app.scroll.saturating_sub(PAGE)),
        _ => Transition::Stay,
    }
}

/// Extra scroll, clamped to the lines below the focused one.
fn scroll_to(app: &App, scroll: usize) -> Transition {
    let scroll = scroll.min(lines_after_focus(app));
    if scroll == app.scroll {
        Transition::Stay
    } else {
        Transition::Scroll(scroll)
    }
}

// ============================================================================
// APPLYING TRANSITIONS
// ============================================================================

/// Apply a transition to the App.
///
/// Returns the effect to execute, if the transition requested one.
/// Rejected navigation leaves the App unchanged (the shell logs it).
pub fn apply(app: &mut App, transition: Transition) -> Option<Effect> {
    match transition {
        Transition::Stay => None,
        Transition::Navigate(nav) => {
            let before = app.shell.route();
            if let Ok(after) = app.shell.apply(nav) {
                if after != before {
                    app.focus = 0;
                    app.scroll = 0;
                    app.status = None;
                }
            }
            None
        }
        Transition::Focus(focus) => {
            app.focus = focus;
            app.scroll = 0;
            None
        }
        Transition::Scroll(scroll) => {
            app.scroll = scroll;
            None
        }
        Transition::ToggleRemember => {
            app.remember_me = !app.remember_me;
            debug!(remember_me = app.remember_me, "toggled remember me");
            None
        }
        Transition::Quit => {
            app.should_quit = true;
            None
        }
        Transition::Effect(effect) => Some(effect),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ScreenRegistry;
    use crate::route::RouteState;
    use crate::types::{ScreenKey, SessionConfig};

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

    fn step(app: &mut App, action: Action) -> Option<Effect> {
        let transition = update(app, &action);
        apply(app, transition)
    }

    // -- Welcome --

    #[test]
    fn quit_from_anywhere() {
        assert_eq!(update(&mobile(), &Action::Quit), Transition::Quit);
        assert_eq!(update(&web("/clinic"), &Action::Quit), Transition::Quit);
    }

    #[test]
    fn welcome_number_keys_pick_roles() {
        let app = mobile();
        assert_eq!(
            update(&app, &Action::NumberKey(1)),
            Transition::Navigate(Nav::SelectRole(Role::Clinic))
        );
        assert_eq!(
            update(&app, &Action::NumberKey(2)),
            Transition::Navigate(Nav::SelectRole(Role::Therapist))
        );
        assert_eq!(update(&app, &Action::NumberKey(3)), Transition::Stay);
    }

    #[test]
    fn welcome_ignores_enter_and_tabs() {
        let app = mobile();
        assert_eq!(update(&app, &Action::Enter), Transition::Stay);
        assert_eq!(update(&app, &Action::NextTab), Transition::Stay);
    }

    // -- Sign-in --

    #[test]
    fn sign_in_enter_confirms() {
        let mut app = mobile();
        step(&mut app, Action::NumberKey(2));
        assert_eq!(app.shell.route(), RouteState::SignIn(Role::Therapist));
        step(&mut app, Action::Enter);
        assert_eq!(
            app.shell.route(),
            RouteState::Active(Role::Therapist, ScreenKey::Dashboard)
        );
    }

    #[test]
    fn sign_in_back_returns_to_welcome() {
        let mut app = mobile();
        step(&mut app, Action::NumberKey(1));
        step(&mut app, Action::Back);
        assert_eq!(app.shell.route(), RouteState::Welcome);
    }

    #[test]
    fn sign_in_remember_me_toggles() {
        let mut app = mobile();
        step(&mut app, Action::NumberKey(1));
        step(&mut app, Action::ToggleRemember);
        assert!(!app.remember_me);
        step(&mut app, Action::ToggleRemember);
        assert!(app.remember_me);
    }

    #[test]
    fn sign_in_forgot_password_is_inert_effect() {
        let mut app = mobile();
        step(&mut app, Action::NumberKey(1));
        step(&mut app, Action::MoveDown);
        let effect = step(&mut app, Action::Enter);
        assert_eq!(effect, Some(Effect::Invoke(ActionId::ForgotPassword)));
        assert_eq!(app.shell.route(), RouteState::SignIn(Role::Clinic));
    }

    // -- Shell --

    #[test]
    fn full_therapist_walkthrough() {
        let mut app = mobile();
        step(&mut app, Action::NumberKey(2));
        step(&mut app, Action::Enter);
        step(&mut app, Action::NumberKey(4));
        assert_eq!(
            app.shell.route(),
            RouteState::Active(Role::Therapist, ScreenKey::Medications)
        );
    }

    #[test]
    fn number_key_beyond_tab_set_is_noop() {
        let mut app = web("/clinic");
        step(&mut app, Action::NumberKey(2));
        step(&mut app, Action::NumberKey(5));
        assert_eq!(app.shell.route(), RouteState::Active(Role::Clinic, ScreenKey::Patients));
        assert_eq!(update(&app, &Action::NumberKey(0)), Transition::Stay);
    }

    #[test]
    fn tab_keys_cycle() {
        let mut app = web("/clinic");
        step(&mut app, Action::PrevTab);
        assert_eq!(app.shell.route(), RouteState::Active(Role::Clinic, ScreenKey::Payroll));
        step(&mut app, Action::NextTab);
        assert_eq!(app.shell.route(), RouteState::Active(Role::Clinic, ScreenKey::Dashboard));
    }

    #[test]
    fn focus_moves_and_clamps() {
        let mut app = web("/therapist");
        step(&mut app, Action::NumberKey(4)); // medications: 4 buttons
        step(&mut app, Action::MoveUp);
        assert_eq!(app.focus, 0);
        for _ in 0..10 {
            step(&mut app, Action::MoveDown);
        }
        assert_eq!(app.focus, 3);
    }

    #[test]
    fn move_down_past_last_button_scrolls() {
        let mut app = web("/clinic");
        step(&mut app, Action::NumberKey(4)); // payroll: one button, notes below it
        assert_eq!(update(&app, &Action::MoveDown), Transition::Scroll(1));

        let below = lines_after_focus(&app);
        assert!(below >= 4);
        for _ in 0..20 {
            step(&mut app, Action::MoveDown);
        }
        assert_eq!(app.focus, 0);
        assert_eq!(app.scroll, below);

        step(&mut app, Action::MoveUp);
        assert_eq!(app.scroll, below - 1);
    }

    #[test]
    fn page_keys_scroll_within_bounds() {
        let mut app = web("/clinic");
        step(&mut app, Action::NumberKey(2)); // patients
        let below = lines_after_focus(&app);
        step(&mut app, Action::PageDown);
        assert_eq!(app.scroll, PAGE.min(below));
        for _ in 0..10 {
            step(&mut app, Action::PageDown);
        }
        assert_eq!(app.scroll, below);
        for _ in 0..10 {
            step(&mut app, Action::PageUp);
        }
        assert_eq!(app.scroll, 0);
        assert_eq!(update(&app, &Action::PageUp), Transition::Stay);
    }

    #[test]
    fn focus_change_resets_scroll() {
        let mut app = web("/clinic");
        step(&mut app, Action::NumberKey(2));
        step(&mut app, Action::PageDown);
        assert!(app.scroll > 0);
        apply(&mut app, Transition::Focus(1));
        assert_eq!(app.scroll, 0);

        step(&mut app, Action::PageDown);
        step(&mut app, Action::NextTab);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn tab_change_resets_focus_and_status() {
        let mut app = web("/therapist");
        step(&mut app, Action::NumberKey(2));
        step(&mut app, Action::MoveDown);
        assert_eq!(app.focus, 1);
        app.status = Some("old".into());
        step(&mut app, Action::NextTab);
        assert_eq!(app.focus, 0);
        assert!(app.status.is_none());
    }

    #[test]
    fn enter_presses_focused_button() {
        let mut app = web("/therapist");
        step(&mut app, Action::NumberKey(2)); // requests
        step(&mut app, Action::MoveDown); // Decline #1
        step(&mut app, Action::MoveDown); // Accept #1
        let effect = step(&mut app, Action::Enter);
        assert_eq!(effect, Some(Effect::Invoke(ActionId::AcceptRequest { id: 1 })));
        // Pressing never navigates.
        assert_eq!(
            app.shell.route(),
            RouteState::Active(Role::Therapist, ScreenKey::Requests)
        );
    }

    #[test]
    fn back_in_mobile_shell_is_noop() {
        let mut app = mobile();
        step(&mut app, Action::NumberKey(1));
        step(&mut app, Action::Enter);
        assert_eq!(update(&app, &Action::Back), Transition::Stay);
    }

    #[test]
    fn back_in_web_shell_visits_landing() {
        let mut app = web("/clinic");
        step(&mut app, Action::Back);
        assert_eq!(app.shell.route(), RouteState::Welcome);
    }

    #[test]
    fn rejected_navigation_keeps_focus() {
        let mut app = mobile();
        app.focus = 2;
        apply(&mut app, Transition::Navigate(Nav::ConfirmSignIn));
        assert_eq!(app.focus, 2);
        assert_eq!(app.shell.route(), RouteState::Welcome);
    }
}
