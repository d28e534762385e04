//! Per-shell tab selection.

use crate::types::{Role, ScreenKey};

/// The screen currently selected inside one role's shell.
///
/// `current` is always a member of `role.screens()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabState {
    role: Role,
    current: ScreenKey,
}

impl TabState {
    /// Entering a shell always starts at the dashboard.
    pub fn new(role: Role) -> Self {
        TabState {
            role,
            current: ScreenKey::Dashboard,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn current(&self) -> ScreenKey {
        self.current
    }

    /// Position of the current tab in the role's tab order.
    pub fn index(&self) -> usize {
        self.role
            .screens()
            .iter()
            .position(|k| *k == self.current)
            .unwrap_or(0)
    }

    /// Switch to `key`. Keys outside the role's set are ignored.
    ///
    /// Returns whether the key was accepted.
    pub fn select_tab(&mut self, key: ScreenKey) -> bool {
        if self.role.owns(key) {
            self.current = key;
            true
        } else {
            false
        }
    }

    /// Select by position in the tab bar (0-based). Out of range is ignored.
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.role.screens().get(index) {
            Some(&key) => self.select_tab(key),
            None => false,
        }
    }

    /// Move to the next tab, wrapping at the end.
    pub fn next(&mut self) {
        let screens = self.role.screens();
        self.current = screens[(self.index() + 1) % screens.len()];
    }

    /// Move to the previous tab, wrapping at the start.
    pub fn previous(&mut self) {
        let screens = self.role.screens();
        self.current = screens[(self.index() + screens.len() - 1) % screens.len()];
    }
}

// ============================================================================
// TESTS
// ============================================================================
