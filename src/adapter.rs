//! Host integration
//!
//! The router itself never touches a URL bar or a history stack. A
//! [`NavigationHost`] supplies those, and a [`Navigator`] wires the two
//! together:
//!
//! - `go(path)` dispatches and, when the transition commits, pushes a history
//!   entry on the host, also when `go` is called from inside a dispatch
//! - `listen()` subscribes to host navigation (back/forward, hash changes),
//!   falling back to polling on hosts without change notification, then
//!   dispatches the current location (or the router's root when the host
//!   shows none)
//!
//! Errors from dispatches triggered by the host cannot be returned to anyone;
//! they are logged instead.

use crate::dispatcher::Router;
use crate::error::{DispatchOutcome, RouterError};
use crate::params::RouteParams;
use crate::{debug_log, error_log, info_log, warn_log};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Snapshot of the host's current URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path component, e.g. `/users/42`
    pub pathname: String,
    /// Fragment including the leading `#`, or empty
    pub hash: String,
    /// Query pairs, last value per key
    pub search: RouteParams,
}

impl Location {
    /// The path a router should dispatch for this location.
    ///
    /// A non-empty hash wins over the pathname (hash navigation), with the
    /// leading `#` removed.
    ///
    /// ```
    /// use pathnav::Location;
    ///
    /// let location = Location {
    ///     pathname: "/index.html".to_string(),
    ///     hash: "#/users/1".to_string(),
    ///     ..Location::default()
    /// };
    /// assert_eq!(location.route_path(), "/users/1");
    /// ```
    pub fn route_path(&self) -> &str {
        match self.hash.strip_prefix('#') {
            Some(fragment) if !fragment.is_empty() => fragment,
            _ => &self.pathname,
        }
    }
}

/// Arbitrary data stored alongside a history entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryState {
    pub data: HashMap<String, String>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// Called by the host with the path to dispatch
pub type NavigationHandler = Box<dyn Fn(&str)>;

/// Repeating task driven by the host's timer
pub type RepeatingTask = Box<dyn Fn()>;

/// What the router needs from its environment.
///
/// Hosts are single-threaded like the router and hand out `&self`, so
/// implementations keep their mutable state in cells.
pub trait NavigationHost {
    /// The URL the host currently shows
    fn current_location(&self) -> Location;

    /// Record a new history entry without notifying navigation handlers
    fn push_history_state(&self, state: &HistoryState, title: &str, path: &str);

    /// Call `handler` whenever the host navigates on its own
    fn on_navigation_event(&self, handler: NavigationHandler);

    /// Run `task` every `interval` until the host shuts down
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask);

    /// Replace the location fragment with `#path`
    fn set_hash(&self, path: &str);

    /// Step back one history entry
    fn back(&self);

    /// Whether `push_history_state` is available
    fn supports_history(&self) -> bool {
        true
    }

    /// Whether `on_navigation_event` ever fires; polling is used otherwise
    fn supports_change_events(&self) -> bool {
        true
    }
}

/// Binds a [`Router`] to a [`NavigationHost`].
pub struct Navigator<H: NavigationHost> {
    router: Rc<Router>,
    host: Rc<H>,
}

impl<H: NavigationHost + 'static> Navigator<H> {
    pub fn new(router: Rc<Router>, host: Rc<H>) -> Self {
        Self { router, host }
    }

    pub fn router(&self) -> &Rc<Router> {
        &self.router
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Navigate to `path`.
    ///
    /// Returns `None` when the navigation was handed to the host (hash
    /// fallback) or dropped because the host has no history support.
    pub fn go(&self, path: &str) -> Result<Option<DispatchOutcome>, RouterError> {
        self.push_state(&HistoryState::new(), "", path)
    }

    /// Like [`go`](Self::go), with explicit history state and title.
    ///
    /// The history entry is pushed once the transition commits. Called from
    /// inside a running dispatch, the outcome is
    /// [`Deferred`](DispatchOutcome::Deferred) and the push happens when the
    /// queued transition commits.
    pub fn push_state(
        &self,
        state: &HistoryState,
        title: &str,
        path: &str,
    ) -> Result<Option<DispatchOutcome>, RouterError> {
        if self.host.supports_history() {
            self.dispatch_and_record(state, title, path).map(Some)
        } else if self.router.config().hash_fallback {
            debug_log!("No history support, navigating to '{}' by hash", path);
            self.host.set_hash(path);
            Ok(None)
        } else {
            warn_log!("No history support and hash fallback disabled; dropping '{}'", path);
            Ok(None)
        }
    }

    /// Step back in host history; the host's navigation event drives dispatch
    pub fn back(&self) {
        self.host.back();
    }

    /// Start following host navigation and dispatch the current location.
    ///
    /// The router's root only applies when the host shows no path of its
    /// own: on hash-driven hosts (no history API) it becomes the hash, on
    /// history hosts sitting at `/` it is dispatched and pushed. A deep link
    /// is always dispatched as is.
    pub fn listen(&self) -> Result<DispatchOutcome, RouterError> {
        let location = self.host.current_location();
        let mut start_at_root = None;
        if let Some(root) = self.router.root().filter(|_| location.hash.is_empty()) {
            if !self.host.supports_history() {
                self.host.set_hash(&root);
            } else if matches!(location.pathname.as_str(), "" | "/") && root != location.pathname {
                start_at_root = Some(root);
            }
        }

        let router = Rc::downgrade(&self.router);
        if self.host.supports_change_events() {
            self.host
                .on_navigation_event(Box::new(move |path: &str| dispatch_from_host(&router, path)));
        } else {
            let interval = self.router.config().poll_interval;
            debug_log!("Host has no change events, polling every {:?}", interval);
            let host = Rc::downgrade(&self.host);
            self.host.schedule_repeating(
                interval,
                Box::new(move || {
                    if let Some(host) = host.upgrade() {
                        let location = host.current_location();
                        dispatch_from_host(&router, location.route_path());
                    }
                }),
            );
        }

        if let Some(root) = start_at_root {
            info_log!("Listening for navigation, starting at root '{}'", root);
            return self.dispatch_and_record(&HistoryState::new(), "", &root);
        }

        let location = self.host.current_location();
        info_log!("Listening for navigation, starting at '{}'", location.route_path());
        self.router.dispatch(location.route_path())
    }

    /// Dispatch `path`, pushing a history entry once the transition commits
    fn dispatch_and_record(
        &self,
        state: &HistoryState,
        title: &str,
        path: &str,
    ) -> Result<DispatchOutcome, RouterError> {
        let host = self.host.clone();
        let (state, title, target) = (state.clone(), title.to_string(), path.to_string());
        self.router
            .dispatch_then(path, move || host.push_history_state(&state, &title, &target))
    }
}

fn dispatch_from_host(router: &Weak<Router>, path: &str) {
    let Some(router) = router.upgrade() else {
        return;
    };
    if let Err(err) = router.dispatch(path) {
        error_log!("Host navigation to '{}' failed: {}", path, err);
    }
}
