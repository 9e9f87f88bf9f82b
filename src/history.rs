//! In-memory navigation host
//!
//! [`MemoryHistory`] implements [`NavigationHost`] with a plain history
//! stack, for tests and headless hosts:
//!
//! - `push_history_state` truncates forward entries and pushes, silently
//! - `back`/`forward` move through the stack and notify handlers, like a
//!   browser's popstate
//! - `set_hash` changes the fragment and notifies handlers, like hashchange
//! - scheduled tasks only run when [`MemoryHistory::tick`] is called

use crate::adapter::{
    HistoryState, Location, NavigationHandler, NavigationHost, RepeatingTask,
};
use crate::params::RouteParams;
use crate::trace_log;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// One entry in the stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Path with optional query, e.g. `/search?q=rust`
    pub path: String,
    pub title: String,
    pub state: HistoryState,
}

impl HistoryEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: String::new(),
            state: HistoryState::new(),
        }
    }
}

/// History stack host kept entirely in memory
pub struct MemoryHistory {
    entries: RefCell<Vec<HistoryEntry>>,
    current: Cell<usize>,
    hash: RefCell<String>,
    handlers: RefCell<Vec<Rc<dyn Fn(&str)>>>,
    tasks: RefCell<Vec<(Duration, Rc<dyn Fn()>)>>,
    max_size: usize,
    history_api: bool,
    change_events: bool,
}

impl MemoryHistory {
    pub const DEFAULT_MAX_SIZE: usize = 1000;

    /// Create a host sitting at `initial_path`
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: RefCell::new(vec![HistoryEntry::new(initial_path)]),
            current: Cell::new(0),
            hash: RefCell::new(String::new()),
            handlers: RefCell::new(Vec::new()),
            tasks: RefCell::new(Vec::new()),
            max_size: Self::DEFAULT_MAX_SIZE,
            history_api: true,
            change_events: true,
        }
    }

    /// Limit the number of kept entries (0 = unlimited); oldest go first
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Behave like a host without a history API
    pub fn without_history_api(mut self) -> Self {
        self.history_api = false;
        self
    }

    /// Behave like a host that never fires navigation events
    pub fn without_change_events(mut self) -> Self {
        self.change_events = false;
        self
    }

    /// Path of the current entry, including any query
    pub fn current_path(&self) -> String {
        self.entries.borrow()[self.current.get()].path.clone()
    }

    pub fn current_entry(&self) -> HistoryEntry {
        self.entries.borrow()[self.current.get()].clone()
    }

    /// All entry paths, oldest first
    pub fn paths(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|e| e.path.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.current.get() > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current.get() + 1 < self.entries.borrow().len()
    }

    /// Step forward one entry and notify handlers
    pub fn forward(&self) {
        if self.can_go_forward() {
            self.current.set(self.current.get() + 1);
            self.hash.borrow_mut().clear();
            self.notify();
        }
    }

    /// Simulate the user opening `path` directly: push it and notify handlers
    pub fn visit(&self, path: impl Into<String>) {
        self.push_entry(HistoryEntry::new(path));
        self.notify();
    }

    /// Run every scheduled task once, as if their interval had elapsed
    pub fn tick(&self) {
        let tasks: Vec<Rc<dyn Fn()>> = self
            .tasks
            .borrow()
            .iter()
            .map(|(_, task)| task.clone())
            .collect();
        for task in tasks {
            task();
        }
    }

    /// Intervals of the scheduled tasks
    pub fn scheduled_intervals(&self) -> Vec<Duration> {
        self.tasks.borrow().iter().map(|(interval, _)| *interval).collect()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    fn push_entry(&self, entry: HistoryEntry) {
        {
            let mut entries = self.entries.borrow_mut();
            entries.truncate(self.current.get() + 1);
            entries.push(entry);
            if self.max_size > 0 && entries.len() > self.max_size {
                let excess = entries.len() - self.max_size;
                entries.drain(0..excess);
            }
            self.current.set(entries.len() - 1);
        }
        self.hash.borrow_mut().clear();
    }

    fn notify(&self) {
        let path = self.current_location().route_path().to_string();
        trace_log!("Memory host navigated to '{}'", path);
        let handlers = self.handlers.borrow().clone();
        for handler in handlers {
            handler(&path);
        }
    }
}

impl NavigationHost for MemoryHistory {
    fn current_location(&self) -> Location {
        let path = self.current_path();
        let (pathname, query) = path.split_once('?').unwrap_or((path.as_str(), ""));
        Location {
            pathname: pathname.to_string(),
            hash: self.hash.borrow().clone(),
            search: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect::<RouteParams>(),
        }
    }

    fn push_history_state(&self, state: &HistoryState, title: &str, path: &str) {
        self.push_entry(HistoryEntry {
            path: path.to_string(),
            title: title.to_string(),
            state: state.clone(),
        });
    }

    fn on_navigation_event(&self, handler: NavigationHandler) {
        self.handlers.borrow_mut().push(Rc::from(handler));
    }

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) {
        self.tasks.borrow_mut().push((interval, Rc::from(task)));
    }

    fn set_hash(&self, path: &str) {
        let hash = format!("#{}", path);
        if *self.hash.borrow() == hash {
            return;
        }
        *self.hash.borrow_mut() = hash;
        self.notify();
    }

    fn back(&self) {
        if self.can_go_back() {
            self.current.set(self.current.get() - 1);
            self.hash.borrow_mut().clear();
            self.notify();
        }
    }

    fn supports_history(&self) -> bool {
        self.history_api
    }

    fn supports_change_events(&self) -> bool {
        self.change_events
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("entries", &self.entries.borrow())
            .field("current", &self.current.get())
            .field("hash", &self.hash.borrow())
            .field("handlers", &self.handler_count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(history: &MemoryHistory) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        history.on_navigation_event(Box::new(move |path: &str| sink.borrow_mut().push(path.to_string())));
        seen
    }

    #[test]
    fn test_push_is_silent() {
        let history = MemoryHistory::new("/");
        let seen = recorded(&history);

        history.push_history_state(&HistoryState::new(), "Users", "/users");
        assert_eq!(history.current_path(), "/users");
        assert_eq!(history.current_entry().title, "Users");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_back_and_forward_notify() {
        let history = MemoryHistory::new("/");
        history.push_history_state(&HistoryState::new(), "", "/a");
        history.push_history_state(&HistoryState::new(), "", "/b");
        let seen = recorded(&history);

        history.back();
        history.back();
        history.back(); // at the start already
        history.forward();

        assert_eq!(*seen.borrow(), vec!["/a", "/", "/a"]);
        assert!(history.can_go_back());
        assert!(history.can_go_forward());
    }

    #[test]
    fn test_push_truncates_forward() {
        let history = MemoryHistory::new("/");
        history.push_history_state(&HistoryState::new(), "", "/a");
        history.push_history_state(&HistoryState::new(), "", "/b");
        history.back();
        history.push_history_state(&HistoryState::new(), "", "/c");

        assert_eq!(history.paths(), vec!["/", "/a", "/c"]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_max_size() {
        let history = MemoryHistory::new("/").with_max_size(2);
        history.push_history_state(&HistoryState::new(), "", "/a");
        history.push_history_state(&HistoryState::new(), "", "/b");

        assert_eq!(history.paths(), vec!["/a", "/b"]);
        assert_eq!(history.current_path(), "/b");
    }

    #[test]
    fn test_location_parsing() {
        let history = MemoryHistory::new("/search?q=rust&page=2&q=router");
        let location = history.current_location();

        assert_eq!(location.pathname, "/search");
        assert_eq!(location.search.get("q"), Some("router"));
        assert_eq!(location.search.get("page"), Some("2"));
        assert_eq!(location.route_path(), "/search");
    }

    #[test]
    fn test_set_hash_notifies_once() {
        let history = MemoryHistory::new("/index.html");
        let seen = recorded(&history);

        history.set_hash("/inbox");
        history.set_hash("/inbox");

        assert_eq!(history.current_location().hash, "#/inbox");
        assert_eq!(*seen.borrow(), vec!["/inbox"]);
    }

    #[test]
    fn test_visit_notifies() {
        let history = MemoryHistory::new("/");
        let seen = recorded(&history);
        history.visit("/external");
        assert_eq!(*seen.borrow(), vec!["/external"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_tick_runs_tasks() {
        let history = MemoryHistory::new("/");
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        history.schedule_repeating(
            Duration::from_millis(50),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        history.tick();
        history.tick();
        assert_eq!(count.get(), 2);
        assert_eq!(history.scheduled_intervals(), vec![Duration::from_millis(50)]);
    }
}
