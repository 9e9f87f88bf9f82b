//! Navigation state bookkeeping

use crate::journal::TransitionRecord;

/// Current/previous path pair plus the router-wide switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current: Option<String>,
    previous: Option<String>,
    root: Option<String>,
    silent: bool,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Whether `path` is already the current path
    pub fn is_current(&self, path: &str) -> bool {
        self.current.as_deref() == Some(path)
    }

    /// Move `current` into `previous` and make `path` current.
    ///
    /// Returns the path that was current before the shift.
    pub fn advance(&mut self, path: &str) -> Option<String> {
        self.previous = self.current.replace(path.to_string());
        self.previous.clone()
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn set_root(&mut self, root: Option<String>) {
        self.root = root;
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }
}

/// Read-only view of a router for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSnapshot {
    pub version: &'static str,
    pub current: Option<String>,
    pub previous: Option<String>,
    /// Registered patterns in registration order
    pub defined_patterns: Vec<String>,
    /// Plugin names in execution order
    pub plugin_names: Vec<String>,
    pub log: Vec<TransitionRecord>,
}
