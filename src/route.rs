//! Top-level route state: welcome, sign-in, active shell.
//!
//! Mobile sessions walk `Welcome → SignIn(role) → Active(role, dashboard)`.
//! Web sessions enter directly from a path (`/`, `/clinic`, `/therapist`).
//!
//! Sign-in is a stub: [`AuthFlow::confirm_sign_in`] never checks
//! credentials and always succeeds once a role has been chosen.

use std::fmt;

use tracing::debug;

use crate::types::{Role, ScreenKey};

// ============================================================================
// TYPES
// ============================================================================

/// Navigation position of a session.
///
/// `Active(role, key)` always has `key` in `role.screens()`; the only
/// constructors that build it check that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    Welcome,
    SignIn(Role),
    Active(Role, ScreenKey),
}

/// Misuse of the navigation state machine.
///
/// Never shown to the end user; callers log and carry on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Sign-in was confirmed before any role was chosen.
    NoRoleSelected { from: RouteState },
    /// The requested transition does not exist from the current state.
    IllegalTransition { from: RouteState, attempted: &'static str },
    /// The screen is not part of the role's tab set.
    ScreenNotInRole { role: Role, key: ScreenKey },
    /// Tab position past the end of the role's tab bar.
    NoSuchTab { role: Role, index: usize },
}

impl fmt::Display for RouteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteState::Welcome => write!(f, "welcome"),
            RouteState::SignIn(role) => write!(f, "{}-signin", role),
            RouteState::Active(role, key) => write!(f, "{}/{}", role, key),
        }
    }
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::NoRoleSelected { from } => {
                write!(f, "Cannot sign in from {}: no role selected", from)
            }
            NavError::IllegalTransition { from, attempted } => {
                write!(f, "Cannot {} from {}", attempted, from)
            }
            NavError::ScreenNotInRole { role, key } => {
                write!(f, "Screen {} is not available to {}", key, role)
            }
            NavError::NoSuchTab { role, index } => {
                write!(f, "{} has no tab at position {}", role, index + 1)
            }
        }
    }
}

impl std::error::Error for NavError {}

impl RouteState {
    /// Role of the session, if one has been chosen.
    pub fn role(&self) -> Option<Role> {
        match self {
            RouteState::Welcome => None,
            RouteState::SignIn(role) | RouteState::Active(role, _) => Some(*role),
        }
    }

    /// Canonical web path for this state.
    ///
    /// Sign-in has no path of its own in the web variant, so it maps to
    /// the landing page.
    pub fn path(&self) -> &'static str {
        match self {
            RouteState::Active(Role::Clinic, _) => "/clinic",
            RouteState::Active(Role::Therapist, _) => "/therapist",
            RouteState::Welcome | RouteState::SignIn(_) => "/",
        }
    }
}

// ============================================================================
// PATH RESOLUTION
// ============================================================================

/// Resolve a web path to a route.
///
/// The deployment `base` prefix is stripped first, then query string,
/// fragment and trailing slashes are ignored. `/clinic` and `/therapist`
/// open the role shell at its dashboard; everything else is the landing
/// page. Tab deep-links (`/clinic/payroll`) are not recognised.
pub fn resolve_path(path: &str, base: &str) -> RouteState {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let base = base.trim_end_matches('/');

    let local = if base.is_empty() {
        path
    } else {
        match path.strip_prefix(base) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    };

    match local.trim_matches('/') {
        "clinic" => RouteState::Active(Role::Clinic, ScreenKey::Dashboard),
        "therapist" => RouteState::Active(Role::Therapist, ScreenKey::Dashboard),
        _ => RouteState::Welcome,
    }
}

// ============================================================================
// AUTH FLOW
// ============================================================================

/// Owner of the live [`RouteState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlow {
    state: RouteState,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlow {
    /// Fresh session at the welcome screen.
    pub fn new() -> Self {
        AuthFlow {
            state: RouteState::Welcome,
        }
    }

    /// Session entered from a web path.
    pub fn from_path(path: &str, base: &str) -> Self {
        AuthFlow {
            state: resolve_path(path, base),
        }
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    /// Welcome → SignIn(role).
    pub fn select_role(&mut self, role: Role) -> Result<RouteState, NavError> {
        match self.state {
            RouteState::Welcome => {
                self.state = RouteState::SignIn(role);
                debug!(%role, "role selected");
                Ok(self.state)
            }
            from => Err(NavError::IllegalTransition {
                from,
                attempted: "select a role",
            }),
        }
    }

    /// SignIn(role) → Active(role, dashboard).
    ///
    /// No credentials are checked. Without a selected role the state is
    /// left untouched and `NoRoleSelected` is returned.
    pub fn confirm_sign_in(&mut self) -> Result<RouteState, NavError> {
        match self.state {
            RouteState::SignIn(role) => {
                self.state = RouteState::Active(role, ScreenKey::Dashboard);
                debug!(%role, "sign-in confirmed");
                Ok(self.state)
            }
            from => Err(NavError::NoRoleSelected { from }),
        }
    }

    /// SignIn(_) → Welcome. The chosen role is forgotten.
    pub fn go_back(&mut self) -> Result<RouteState, NavError> {
        match self.state {
            RouteState::SignIn(_) => {
                self.state = RouteState::Welcome;
                Ok(self.state)
            }
            from => Err(NavError::IllegalTransition {
                from,
                attempted: "go back",
            }),
        }
    }

    /// Replace the route with whatever `path` resolves to.
    pub fn visit(&mut self, path: &str, base: &str) -> RouteState {
        self.state = resolve_path(path, base);
        debug!(path, route = %self.state, "visited path");
        self.state
    }

    /// Record the tab shown inside the active shell.
    pub fn show_screen(&mut self, key: ScreenKey) -> Result<RouteState, NavError> {
        match self.state {
            RouteState::Active(role, _) if role.owns(key) => {
                self.state = RouteState::Active(role, key);
                Ok(self.state)
            }
            RouteState::Active(role, _) => Err(NavError::ScreenNotInRole { role, key }),
            from => Err(NavError::IllegalTransition {
                from,
                attempted: "show a screen",
            }),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
