//! Append-only transition log
//!
//! One record per dispatch that got past the silent and same-path checks,
//! whether or not the path matched a route. The log is diagnostic only and
//! grows without bound.

use std::time::SystemTime;

/// One recorded transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    /// Path that was current before the dispatch
    pub from: Option<String>,
    /// Path passed to the dispatch
    pub to: String,
    /// Wall-clock time the transition was recorded
    pub time: SystemTime,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationLog {
    records: Vec<TransitionRecord>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, from: Option<String>, to: String) {
        self.records.push(TransitionRecord {
            from,
            to,
            time: SystemTime::now(),
        });
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
