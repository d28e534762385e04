//! Session controller: route + tab selection + screen registry.
//!
//! The single owner of navigation state for one session. Front ends call
//! the navigation methods and ask [`Shell::displayed`] what to draw.

use tracing::{debug, info, warn};

use crate::registry::{ActionOutcome, Panel, ScreenRegistry};
use crate::route::{AuthFlow, NavError, RouteState};
use crate::tabs::TabState;
use crate::types::{ActionId, Role, ScreenKey, SessionConfig, Variant};

/// A navigation request, decoupled from how it was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    SelectRole(Role),
    ConfirmSignIn,
    GoBack,
    SelectTab(ScreenKey),
    /// Select by position in the tab bar (0-based).
    SelectTabAt(usize),
    NextTab,
    PreviousTab,
    /// Web variant: follow a link.
    Visit(String),
}

/// What the front end should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum Displayed {
    Welcome,
    SignIn(Role),
    Shell(Panel),
}

#[derive(Debug)]
pub struct Shell {
    config: SessionConfig,
    auth: AuthFlow,
    /// Present exactly when the route is `Active`.
    tabs: Option<TabState>,
    registry: ScreenRegistry,
}

impl Shell {
    /// Start a session at the welcome screen.
    pub fn new(config: SessionConfig, registry: ScreenRegistry) -> Self {
        Shell {
            config,
            auth: AuthFlow::new(),
            tabs: None,
            registry,
        }
    }

    /// Start a web session at `path`.
    pub fn at_path(config: SessionConfig, registry: ScreenRegistry, path: &str) -> Self {
        let auth = AuthFlow::from_path(path, &config.base_path);
        let mut shell = Shell {
            config,
            auth,
            tabs: None,
            registry,
        };
        shell.sync_tabs();
        shell
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn route(&self) -> RouteState {
        self.auth.state()
    }

    pub fn tabs(&self) -> Option<&TabState> {
        self.tabs.as_ref()
    }

    /// Resolve the current route to something drawable.
    pub fn displayed(&self) -> Displayed {
        match self.auth.state() {
            RouteState::Welcome => Displayed::Welcome,
            RouteState::SignIn(role) => Displayed::SignIn(role),
            RouteState::Active(role, key) => match self.registry.render(role, key) {
                Some(panel) => Displayed::Shell(panel),
                // Unreachable while the route invariant holds.
                None => Displayed::Welcome,
            },
        }
    }

    /// Apply a navigation request.
    ///
    /// Misuse (wrong state, foreign tab) is reported as an error and leaves
    /// the session unchanged.
    pub fn apply(&mut self, nav: Nav) -> Result<RouteState, NavError> {
        let from = self.auth.state();
        let result = match nav {
            Nav::SelectRole(role) => self.select_role(role),
            Nav::ConfirmSignIn => self.confirm_sign_in(),
            Nav::GoBack => self.go_back(),
            Nav::SelectTab(key) => self.select_tab(key),
            Nav::SelectTabAt(index) => self.select_tab_at(index),
            Nav::NextTab => self.step_tab(TabState::next),
            Nav::PreviousTab => self.step_tab(TabState::previous),
            Nav::Visit(path) => Ok(self.visit(&path)),
        };
        match &result {
            Ok(to) if *to != from => info!(%from, %to, "navigated"),
            Ok(_) => {}
            Err(e) => warn!(%from, error = %e, "navigation rejected"),
        }
        result
    }

    /// Choose a role on the welcome screen.
    ///
    /// Mobile sessions go to that role's sign-in form. Web sessions have no
    /// sign-in step and open the role's path directly.
    pub fn select_role(&mut self, role: Role) -> Result<RouteState, NavError> {
        match self.config.variant {
            Variant::Mobile => self.auth.select_role(role),
            Variant::Web => match self.auth.state() {
                RouteState::Welcome => {
                    let path = RouteState::Active(role, ScreenKey::Dashboard).path();
                    Ok(self.visit(path))
                }
                from => Err(NavError::IllegalTransition {
                    from,
                    attempted: "select a role",
                }),
            },
        }
    }

    /// Complete the stub sign-in and enter the role's shell at its dashboard.
    pub fn confirm_sign_in(&mut self) -> Result<RouteState, NavError> {
        let state = self.auth.confirm_sign_in()?;
        self.sync_tabs();
        Ok(state)
    }

    /// Leave the current screen.
    ///
    /// From sign-in this returns to welcome in both variants. Web sessions
    /// can also leave a role shell for the landing page.
    pub fn go_back(&mut self) -> Result<RouteState, NavError> {
        match (self.config.variant, self.auth.state()) {
            (Variant::Web, RouteState::Active(..)) => Ok(self.visit("/")),
            _ => {
                let state = self.auth.go_back()?;
                self.sync_tabs();
                Ok(state)
            }
        }
    }

    /// Switch tab inside the active shell. Foreign keys are a no-op error.
    pub fn select_tab(&mut self, key: ScreenKey) -> Result<RouteState, NavError> {
        let from = self.auth.state();
        let Some(tabs) = self.tabs.as_mut() else {
            return Err(NavError::IllegalTransition {
                from,
                attempted: "select a tab",
            });
        };
        if !tabs.select_tab(key) {
            return Err(NavError::ScreenNotInRole {
                role: tabs.role(),
                key,
            });
        }
        self.auth.show_screen(key)
    }

    /// Switch to the tab at `index` in the role's tab bar.
    pub fn select_tab_at(&mut self, index: usize) -> Result<RouteState, NavError> {
        let from = self.auth.state();
        let Some(tabs) = self.tabs.as_mut() else {
            return Err(NavError::IllegalTransition {
                from,
                attempted: "select a tab",
            });
        };
        if !tabs.select_index(index) {
            return Err(NavError::NoSuchTab {
                role: tabs.role(),
                index,
            });
        }
        let key = tabs.current();
        self.auth.show_screen(key)
    }

    fn step_tab(&mut self, step: fn(&mut TabState)) -> Result<RouteState, NavError> {
        let from = self.auth.state();
        let Some(tabs) = self.tabs.as_mut() else {
            return Err(NavError::IllegalTransition {
                from,
                attempted: "change tabs",
            });
        };
        step(tabs);
        let key = tabs.current();
        self.auth.show_screen(key)
    }

    /// Follow a web path. Unknown paths land on welcome.
    pub fn visit(&mut self, path: &str) -> RouteState {
        let state = self.auth.visit(path, &self.config.base_path);
        self.sync_tabs();
        state
    }

    /// Press a panel button. Never changes navigation state.
    pub fn invoke(&self, action: &ActionId) -> ActionOutcome {
        let outcome = self.registry.invoke(action);
        debug!(?action, ?outcome, "action invoked");
        outcome
    }

    /// Rebuild tab state after a route change.
    fn sync_tabs(&mut self) {
        self.tabs = match self.auth.state() {
            RouteState::Active(role, key) => {
                let mut tabs = TabState::new(role);
                tabs.select_tab(key);
                Some(tabs)
            }
            RouteState::Welcome | RouteState::SignIn(_) => None,
        };
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Block;

    fn mobile() -> Shell {
        Shell::new(SessionConfig::default(), ScreenRegistry::default())
    }

    fn web(path: &str) -> Shell {
        let config = SessionConfig {
            variant: Variant::Web,
            ..SessionConfig::default()
        };
        Shell::at_path(config, ScreenRegistry::default(), path)
    }

    #[test]
    fn therapist_walkthrough_to_medications() {
        let mut shell = mobile();
        assert_eq!(shell.displayed(), Displayed::Welcome);

        shell.apply(Nav::SelectRole(Role::Therapist)).unwrap();
        assert_eq!(shell.displayed(), Displayed::SignIn(Role::Therapist));

        shell.apply(Nav::ConfirmSignIn).unwrap();
        shell.apply(Nav::SelectTab(ScreenKey::Medications)).unwrap();

        let Displayed::Shell(panel) = shell.displayed() else {
            panic!("expected a shell panel");
        };
        assert_eq!((panel.role, panel.key), (Role::Therapist, ScreenKey::Medications));
        assert_eq!(
            panel.row_titles(),
            vec!["Lisinopril", "Metformin", "Atorvastatin"]
        );
    }

    #[test]
    fn web_clinic_path_shows_dashboard_stats() {
        let shell = web("/clinic");
        let Displayed::Shell(panel) = shell.displayed() else {
            panic!("expected a shell panel");
        };
        assert_eq!(panel.key, ScreenKey::Dashboard);
        let stats: Vec<String> = panel.stats().iter().map(|s| s.display()).collect();
        assert_eq!(stats, vec!["28 / 40", "45 available", "12 pending"]);
    }

    #[test]
    fn foreign_tab_is_rejected_and_tab_kept() {
        let mut shell = mobile();
        shell.apply(Nav::SelectRole(Role::Therapist)).unwrap();
        shell.apply(Nav::ConfirmSignIn).unwrap();
        shell.apply(Nav::SelectTab(ScreenKey::Requests)).unwrap();

        assert!(shell.apply(Nav::SelectTab(ScreenKey::Payroll)).is_err());
        assert_eq!(
            shell.route(),
            RouteState::Active(Role::Therapist, ScreenKey::Requests)
        );
        assert_eq!(shell.tabs().map(|t| t.current()), Some(ScreenKey::Requests));
    }

    #[test]
    fn tab_position_follows_tab_bar_order() {
        let mut shell = web("/therapist");
        assert_eq!(
            shell.apply(Nav::SelectTabAt(3)),
            Ok(RouteState::Active(Role::Therapist, ScreenKey::Medications))
        );
        assert_eq!(
            shell.apply(Nav::SelectTabAt(5)),
            Err(NavError::NoSuchTab { role: Role::Therapist, index: 5 })
        );
        assert_eq!(shell.tabs().map(|t| t.current()), Some(ScreenKey::Medications));
    }

    #[test]
    fn web_entry_path_sets_up_tabs() {
        let shell = web("/luminous-rehab/therapist/");
        assert_eq!(shell.route(), RouteState::Active(Role::Therapist, ScreenKey::Dashboard));
        assert_eq!(shell.tabs().map(|t| t.role()), Some(Role::Therapist));
    }

    #[test]
    fn tab_cycling_keeps_route_and_tabs_in_step() {
        let mut shell = web("/clinic");
        shell.apply(Nav::PreviousTab).unwrap();
        assert_eq!(shell.route(), RouteState::Active(Role::Clinic, ScreenKey::Payroll));
        shell.apply(Nav::NextTab).unwrap();
        assert_eq!(shell.route(), RouteState::Active(Role::Clinic, ScreenKey::Dashboard));
    }

    #[test]
    fn tab_changes_outside_a_shell_are_rejected() {
        let mut shell = mobile();
        assert!(shell.apply(Nav::SelectTab(ScreenKey::Dashboard)).is_err());
        assert!(shell.apply(Nav::NextTab).is_err());
        assert_eq!(shell.route(), RouteState::Welcome);
    }

    #[test]
    fn sign_in_without_role_leaves_welcome() {
        let mut shell = mobile();
        assert!(matches!(
            shell.apply(Nav::ConfirmSignIn),
            Err(NavError::NoRoleSelected { .. })
        ));
        assert_eq!(shell.displayed(), Displayed::Welcome);
    }

    #[test]
    fn back_from_sign_in_returns_to_welcome() {
        let mut shell = mobile();
        shell.apply(Nav::SelectRole(Role::Clinic)).unwrap();
        assert_eq!(shell.apply(Nav::GoBack), Ok(RouteState::Welcome));
        assert!(shell.tabs().is_none());
    }

    #[test]
    fn mobile_shell_has_no_back_target() {
        let mut shell = mobile();
        shell.apply(Nav::SelectRole(Role::Clinic)).unwrap();
        shell.apply(Nav::ConfirmSignIn).unwrap();
        assert!(shell.apply(Nav::GoBack).is_err());
        assert_eq!(shell.route(), RouteState::Active(Role::Clinic, ScreenKey::Dashboard));
    }

    #[test]
    fn web_role_choice_skips_sign_in() {
        let mut shell = web("/");
        assert_eq!(
            shell.apply(Nav::SelectRole(Role::Therapist)),
            Ok(RouteState::Active(Role::Therapist, ScreenKey::Dashboard))
        );
        assert_eq!(shell.apply(Nav::GoBack), Ok(RouteState::Welcome));
    }

    #[test]
    fn web_unknown_path_is_landing() {
        let shell = web("/clinic/payroll");
        assert_eq!(shell.displayed(), Displayed::Welcome);
        assert!(shell.tabs().is_none());
    }

    #[test]
    fn visiting_a_shell_resets_to_dashboard() {
        let mut shell = web("/clinic");
        shell.apply(Nav::SelectTab(ScreenKey::Payroll)).unwrap();
        shell.apply(Nav::Visit("/luminous-rehab/clinic".into())).unwrap();
        assert_eq!(shell.route(), RouteState::Active(Role::Clinic, ScreenKey::Dashboard));
    }

    #[test]
    fn invoking_buttons_changes_nothing() {
        let mut shell = mobile();
        shell.apply(Nav::SelectRole(Role::Therapist)).unwrap();
        shell.apply(Nav::ConfirmSignIn).unwrap();
        shell.apply(Nav::SelectTab(ScreenKey::Requests)).unwrap();
        let before = shell.displayed();

        let Displayed::Shell(panel) = &before else {
            panic!("expected a shell panel");
        };
        for button in panel.buttons() {
            assert_eq!(shell.invoke(&button.action), ActionOutcome::Inert);
        }
        assert_eq!(shell.displayed(), before);
    }

    #[test]
    fn payroll_panel_lists_notifications() {
        let mut shell = web("/clinic");
        shell.apply(Nav::SelectTab(ScreenKey::Payroll)).unwrap();
        let Displayed::Shell(panel) = shell.displayed() else {
            panic!("expected a shell panel");
        };
        let notes = panel
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Note { .. }))
            .count();
        assert_eq!(notes, 3);
    }
}
