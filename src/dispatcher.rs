//! Router and dispatch state machine
//!
//! A dispatch moves through these stages:
//!
//! 1. **Silent** - if the router is silent, return immediately.
//! 2. **Same path** - if the path is already current, return immediately.
//! 3. **Resolving** - parse the new path and the one being left, find their
//!    entries, then shift `current` into `previous`.
//! 4. Emit `route:change` and append to the log, matched or not.
//! 5. **Exiting** - if the entry being left has an exit hook, emit
//!    `route:exit` and run it.
//! 6. **Plugin gate** - if the new path matched, emit `route:enter` and run
//!    plugins; the first to halt vetoes the rest of the transition.
//! 7. **Entering / Acting** - run enter hooks, then the action unless a hook
//!    halted.
//! 8. **Rescuing** - if nothing matched, run the rescue callback if any.
//!
//! Both paths are resolved before any state changes, so a path that fails to
//! parse leaves `current`, `previous` and the log untouched.
//!
//! # Nested dispatch
//!
//! Callbacks may call [`Router::dispatch`] again. Such calls are queued and
//! return [`DispatchOutcome::Deferred`]; once the running dispatch finishes,
//! queued paths are dispatched first-in first-out. At most
//! [`RouterConfig::max_deferred`] of them are drained per outer dispatch.
//!
//! [`Router::dispatch_then`] attaches work to a dispatch that runs only once
//! the transition commits, and before any queued dispatch is drained. A
//! deferred request keeps its callback until its turn comes, so the
//! callbacks run in the same order as the transitions they belong to.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ParseCache};
use crate::config::RouterConfig;
use crate::error::{DispatchOutcome, RouterError};
use crate::events::{notify, EventBus, RouteEvent, ROUTE_CHANGE, ROUTE_ENTER, ROUTE_EXIT};
use crate::journal::{NavigationLog, TransitionRecord};
use crate::lifecycle::Flow;
use crate::matcher::{match_path, ParsedPath};
use crate::plugins::Plugins;
use crate::registry::RouteRegistry;
use crate::route::{RouteEntry, RunOutcome};
use crate::state::{NavigationState, RouterSnapshot};
use crate::{debug_log, error_log, trace_log, warn_log};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use url::Url;

/// Callback run when a dispatched path matches no route
pub type Rescue = Rc<dyn Fn(&str)>;

/// Work attached to a dispatch, run once its transition commits
pub type OnCommit = Box<dyn FnOnce()>;

/// A path router with lifecycle hooks, plugins and events.
///
/// All methods take `&self`; the router keeps its state in cells and never
/// holds a borrow while user code runs, so callbacks can register routes,
/// emit events or dispatch through a shared handle.
///
/// The router is single-threaded (`!Send`). A multi-threaded host has to
/// funnel dispatches onto one thread.
///
/// # Example
///
/// ```
/// use pathnav::{DispatchOutcome, Flow, Router};
///
/// let router = Router::new();
/// router
///     .route("/users/:id(/edit)")
///     .unwrap()
///     .enter(|_| Flow::Continue)
///     .to(|params| assert_eq!(params.get("id"), Some("42")));
///
/// assert_eq!(router.dispatch("/users/42").unwrap(), DispatchOutcome::Completed);
/// assert_eq!(router.dispatch("/users/42").unwrap(), DispatchOutcome::Unchanged);
/// ```
pub struct Router {
    config: RouterConfig,
    base: Url,
    registry: RefCell<RouteRegistry>,
    plugins: RefCell<Plugins>,
    events: RefCell<EventBus>,
    state: RefCell<NavigationState>,
    log: RefCell<NavigationLog>,
    rescue: RefCell<Option<Rescue>>,
    #[cfg(feature = "cache")]
    cache: RefCell<ParseCache>,
    dispatching: Cell<bool>,
    pending: RefCell<VecDeque<(String, Option<OnCommit>)>>,
}

impl Router {
    /// Create a router with the default configuration
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
            .expect("default origin is a valid absolute URL")
    }

    /// Create a router, failing if the configured origin is not a URL
    pub fn with_config(config: RouterConfig) -> Result<Self, RouterError> {
        let base = config.base_url()?;

        let mut state = NavigationState::new();
        state.set_root(config.root.clone());
        state.set_silent(config.silent);

        Ok(Self {
            base,
            registry: RefCell::new(RouteRegistry::new()),
            plugins: RefCell::new(Plugins::new()),
            events: RefCell::new(EventBus::new()),
            state: RefCell::new(state),
            log: RefCell::new(NavigationLog::new()),
            rescue: RefCell::new(None),
            #[cfg(feature = "cache")]
            cache: RefCell::new(ParseCache::with_capacity(config.cache_capacity)),
            dispatching: Cell::new(false),
            pending: RefCell::new(VecDeque::new()),
            config,
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register `pattern`, or get the entry already registered under it
    pub fn route(&self, pattern: &str) -> Result<Rc<RouteEntry>, RouterError> {
        self.registry.borrow_mut().register(pattern)
    }

    /// Set the path used at startup when the host location has none
    pub fn set_root(&self, path: impl Into<String>) {
        self.state.borrow_mut().set_root(Some(path.into()));
    }

    pub fn root(&self) -> Option<String> {
        self.state.borrow().root().map(str::to_string)
    }

    /// Set the callback run when a dispatched path matches nothing
    pub fn set_rescue<F>(&self, rescue: F)
    where
        F: Fn(&str) + 'static,
    {
        *self.rescue.borrow_mut() = Some(Rc::new(rescue));
    }

    /// Register a plugin; re-using a name replaces it in place
    pub fn use_plugin<F>(&self, name: impl Into<String>, plugin: F)
    where
        F: Fn(&RouteEntry) -> Flow + 'static,
    {
        self.plugins.borrow_mut().register(name, Rc::new(plugin));
    }

    /// Subscribe to an event
    pub fn on<F>(&self, event: impl Into<String>, subscriber: F)
    where
        F: Fn(&RouteEvent) + 'static,
    {
        self.events.borrow_mut().on(event, Rc::new(subscriber));
    }

    /// Call every subscriber of `event`, in subscription order
    pub fn emit(&self, event: &str, data: &RouteEvent) {
        let subscribers = self.events.borrow().subscribers(event);
        notify(&subscribers, data);
    }

    /// Enable or disable silent mode, where dispatch does nothing
    pub fn set_silent(&self, silent: bool) {
        self.state.borrow_mut().set_silent(silent);
    }

    pub fn is_silent(&self) -> bool {
        self.state.borrow().is_silent()
    }

    // ------------------------------------------------------------------
    // Matching
    // ------------------------------------------------------------------

    /// Find the first entry matching `path`.
    ///
    /// With `extract` set, the entry's parameters are replaced by the ones
    /// resolved from `path`. A path that cannot be parsed is an error, not a
    /// miss.
    pub fn match_path(
        &self,
        path: &str,
        extract: bool,
    ) -> Result<Option<Rc<RouteEntry>>, RouterError> {
        let parsed = self.parse(path)?;
        Ok(self.find(&parsed, extract))
    }

    fn find(&self, parsed: &ParsedPath, extract: bool) -> Option<Rc<RouteEntry>> {
        match_path(self.registry.borrow().iter(), parsed, extract)
    }

    #[cfg(feature = "cache")]
    fn parse(&self, path: &str) -> Result<ParsedPath, RouterError> {
        if let Some(parsed) = self.cache.borrow_mut().get(path) {
            return Ok(parsed);
        }
        let parsed = ParsedPath::parse(&self.base, path)?;
        self.cache
            .borrow_mut()
            .insert(path.to_string(), parsed.clone());
        Ok(parsed)
    }

    #[cfg(not(feature = "cache"))]
    fn parse(&self, path: &str) -> Result<ParsedPath, RouterError> {
        ParsedPath::parse(&self.base, path)
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Navigate the router to `path`, running the full transition.
    pub fn dispatch(&self, path: &str) -> Result<DispatchOutcome, RouterError> {
        self.dispatch_with(path, None)
    }

    /// Like [`dispatch`](Self::dispatch), running `on_commit` once the
    /// transition to `path` commits.
    ///
    /// `on_commit` runs before any dispatch queued meanwhile. When this call
    /// is itself deferred, `on_commit` travels with the queued path and runs
    /// when (and only if) that later transition commits.
    pub fn dispatch_then<F>(&self, path: &str, on_commit: F) -> Result<DispatchOutcome, RouterError>
    where
        F: FnOnce() + 'static,
    {
        self.dispatch_with(path, Some(Box::new(on_commit)))
    }

    fn dispatch_with(
        &self,
        path: &str,
        on_commit: Option<OnCommit>,
    ) -> Result<DispatchOutcome, RouterError> {
        if self.is_silent() {
            trace_log!("Silent, ignoring dispatch to '{}'", path);
            return Ok(DispatchOutcome::Silenced);
        }

        if self.dispatching.get() {
            debug_log!("Deferring nested dispatch to '{}'", path);
            self.pending
                .borrow_mut()
                .push_back((path.to_string(), on_commit));
            return Ok(DispatchOutcome::Deferred);
        }

        let _guard = DispatchGuard::enter(self);
        let outcome = self.transition(path)?;
        if outcome.committed() {
            if let Some(on_commit) = on_commit {
                on_commit();
            }
        }
        self.drain_deferred();
        Ok(outcome)
    }

    /// Whether a dispatch is currently running
    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    fn drain_deferred(&self) {
        let mut drained = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((path, on_commit)) = next else {
                break;
            };

            if drained == self.config.max_deferred {
                let dropped = self.pending.borrow().len() + 1;
                warn_log!(
                    "Dropping {} deferred dispatch(es) after draining {}",
                    dropped,
                    drained
                );
                self.pending.borrow_mut().clear();
                break;
            }
            drained += 1;

            if self.is_silent() {
                continue;
            }
            match self.transition(&path) {
                Ok(outcome) => {
                    debug_log!("Deferred dispatch to '{}' finished: {:?}", path, outcome);
                    if outcome.committed() {
                        if let Some(on_commit) = on_commit {
                            on_commit();
                        }
                    }
                }
                Err(err) => {
                    error_log!("Deferred dispatch to '{}' failed: {}", path, err);
                }
            }
        }
    }

    fn transition(&self, path: &str) -> Result<DispatchOutcome, RouterError> {
        if self.state.borrow().is_current(path) {
            return Ok(DispatchOutcome::Unchanged);
        }

        // Resolve everything that can fail before touching state.
        let parsed = self.parse(path)?;
        let outgoing = self.state.borrow().current().map(str::to_string);
        let leaving = match outgoing {
            Some(ref old) => {
                let parsed_old = self.parse(old)?;
                self.find(&parsed_old, false)
            }
            None => None,
        };
        let matched = self.find(&parsed, true);

        let from = self.state.borrow_mut().advance(path);
        debug_log!("Dispatching {:?} -> '{}'", from, path);

        self.emit(
            ROUTE_CHANGE,
            &RouteEvent::Change {
                from: from.clone(),
                to: path.to_string(),
            },
        );
        self.log.borrow_mut().record(from, path.to_string());

        if let Some(leaving) = leaving.filter(|entry| entry.has_exit_hook()) {
            self.emit(ROUTE_EXIT, &RouteEvent::Exit(leaving.clone()));
            leaving.run_exit();
        }

        let Some(entry) = matched else {
            let rescue = self.rescue.borrow().clone();
            return Ok(match rescue {
                Some(rescue) => {
                    debug_log!("No route for '{}', running rescue", path);
                    rescue(path);
                    DispatchOutcome::Rescued
                }
                None => {
                    debug_log!("No route for '{}'", path);
                    DispatchOutcome::Unmatched
                }
            });
        };

        self.emit(ROUTE_ENTER, &RouteEvent::Enter(entry.clone()));

        let plugins = self.plugins.borrow().snapshot();
        if let Some(plugin) = Plugins::run(&plugins, &entry) {
            debug_log!("Plugin '{}' vetoed '{}'", plugin, path);
            return Ok(DispatchOutcome::Vetoed { plugin });
        }

        Ok(match entry.run() {
            RunOutcome::Completed => DispatchOutcome::Completed,
            RunOutcome::Halted(hook) => {
                debug_log!("Enter hook {} of '{}' halted", hook, entry.pattern());
                DispatchOutcome::Halted { hook }
            }
        })
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn version(&self) -> &'static str {
        crate::VERSION
    }

    pub fn current(&self) -> Option<String> {
        self.state.borrow().current().map(str::to_string)
    }

    pub fn previous(&self) -> Option<String> {
        self.state.borrow().previous().map(str::to_string)
    }

    /// Copy of the transition log
    pub fn log(&self) -> Vec<TransitionRecord> {
        self.log.borrow().records().to_vec()
    }

    pub fn log_len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Read-only snapshot of the router
    pub fn inspect_state(&self) -> RouterSnapshot {
        let state = self.state.borrow();
        RouterSnapshot {
            version: crate::VERSION,
            current: state.current().map(str::to_string),
            previous: state.previous().map(str::to_string),
            defined_patterns: self.registry.borrow().patterns(),
            plugin_names: self.plugins.borrow().names(),
            log: self.log(),
        }
    }

    /// Write the snapshot to the debug log
    pub fn debug(&self) {
        let snapshot = self.inspect_state();
        debug_log!("Router state: {:#?}", snapshot);
    }

    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats().clone()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("state", &self.state.borrow())
            .field("registry", &self.registry.borrow())
            .field("plugins", &self.plugins.borrow())
            .field("dispatching", &self.dispatching.get())
            .finish_non_exhaustive()
    }
}

/// Marks a dispatch as running; resets the flag and drops queued paths even
/// when a callback panics.
struct DispatchGuard<'a> {
    router: &'a Router,
}

impl<'a> DispatchGuard<'a> {
    fn enter(router: &'a Router) -> Self {
        router.dispatching.set(true);
        Self { router }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.router.dispatching.set(false);
        self.router.pending.borrow_mut().clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
