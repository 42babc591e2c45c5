//! Host-owned state the session reacts to.
//!
//! The host owns the ordered tab list and the active index; the core never
//! creates or deletes tabs, it only reads the active one and requests
//! updates through callbacks.

use std::collections::HashMap;

use crate::surface::{History, Position};

/// Stored undo logs, keyed by tab.
pub type DocHistories = HashMap<String, History>;

/// View position persisted per tab and restored verbatim on re-activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollData {
    pub top: f64,
    pub left: f64,
    pub cursor_position: Position,
}

/// One editable cartridge document.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub key: String,
    pub text: String,
    pub scroll_data: Option<ScrollData>,
}

impl Tab {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            scroll_data: None,
        }
    }
}

/// Source line reported by the game runtime when a cartridge throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLine {
    pub line: usize,
}

/// Position within the lesson catalogue while a tutorial is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tutorial {
    pub lesson_index: usize,
    pub slide_index: usize,
}

/// Everything the host feeds the session on mount and on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct HostState {
    pub tabs: Vec<Tab>,
    pub active: usize,
    pub histories: DocHistories,
    pub tutorial: Option<Tutorial>,
    pub error_line: Option<ErrorLine>,
}

impl HostState {
    pub fn new(tabs: Vec<Tab>, active: usize) -> Self {
        Self {
            tabs,
            active,
            histories: DocHistories::new(),
            tutorial: None,
            error_line: None,
        }
    }

    pub fn active_tab(&self) -> &Tab {
        self.tabs.get(self.active).expect("Active tab should exist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_tab_follows_index() {
        let mut state = HostState::new(
            vec![Tab::new("code", "a"), Tab::new("sprites", "b")],
            0,
        );
        assert_eq!(state.active_tab().key, "code");
        state.active = 1;
        assert_eq!(state.active_tab().key, "sprites");
    }

    #[test]
    fn new_state_has_no_tutorial_or_error() {
        let state = HostState::new(vec![Tab::new("code", "")], 0);
        assert!(state.tutorial.is_none());
        assert!(state.error_line.is_none());
        assert!(state.histories.is_empty());
    }
}
