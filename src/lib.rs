//! # pathnav
//!
//! A client-side path router:
//!
//! - **Optional segments** - `/archive(/:year)(/:month)` registers three
//!   concrete variants, shortest first
//! - **Named parameters** - `:id` segments, merged with query string pairs
//! - **Lifecycle hooks** - enter hooks that can halt, an action, an exit hook
//! - **Plugins** - global gates run on every match, able to veto
//! - **Events** - `route:change`, `route:exit`, `route:enter` and custom ones
//! - **Host adapter** - history push, back/forward, hash and polling fallback
//!
//! # Quick Start
//!
//! ```
//! use pathnav::{DispatchOutcome, Flow, Router};
//!
//! let router = Router::new();
//!
//! router
//!     .route("/users/:id")?
//!     .enter(|_entry| Flow::Continue)
//!     .to(|params| println!("showing user {}", params.get("id").unwrap_or("?")));
//!
//! router.set_rescue(|path| println!("no page at {path}"));
//! router.use_plugin("audit", |entry| {
//!     println!("entering {}", entry.pattern());
//!     Flow::Continue
//! });
//!
//! assert_eq!(router.dispatch("/users/42?tab=posts")?, DispatchOutcome::Completed);
//! assert_eq!(router.dispatch("/nowhere")?, DispatchOutcome::Rescued);
//! # Ok::<(), pathnav::RouterError>(())
//! ```
//!
//! # Matching order
//!
//! Entries are tried in registration order and the first matching variant
//! wins. Register specific patterns before overlapping generic ones.
//!
//! # Host integration
//!
//! ```
//! use pathnav::{MemoryHistory, Navigator, Router};
//! use std::rc::Rc;
//!
//! let router = Rc::new(Router::new());
//! router.route("/")?;
//! router.route("/inbox")?;
//!
//! let navigator = Navigator::new(router.clone(), Rc::new(MemoryHistory::new("/")));
//! navigator.listen()?;
//! navigator.go("/inbox")?;
//! navigator.back();
//!
//! assert_eq!(router.current().as_deref(), Some("/"));
//! # Ok::<(), pathnav::RouterError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache for parsed request paths

#![doc(html_root_url = "https://docs.rs/pathnav/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod dispatcher;
pub mod matcher;
pub mod pattern;
pub mod registry;
pub mod route;
pub mod state;

// Error handling
pub mod error;

// Hooks, plugins and events
pub mod events;
pub mod lifecycle;
pub mod plugins;

// Host integration
pub mod adapter;
pub mod history;

// Other modules
pub mod config;
pub mod journal;
pub mod params;

// Re-export main types for convenient access
pub use adapter::{
    HistoryState, Location, NavigationHandler, NavigationHost, Navigator, RepeatingTask,
};
#[cfg(feature = "cache")]
pub use cache::{CacheStats, ParseCache};
pub use config::RouterConfig;
pub use dispatcher::{OnCommit, Rescue, Router};
pub use error::{DispatchOutcome, RouterError};
pub use events::{notify, EventBus, RouteEvent, Subscriber, ROUTE_CHANGE, ROUTE_ENTER, ROUTE_EXIT};
pub use history::{HistoryEntry, MemoryHistory};
pub use journal::{NavigationLog, TransitionRecord};
pub use lifecycle::Flow;
pub use matcher::{match_path, match_variant, ParsedPath};
pub use params::RouteParams;
pub use pattern::RouteTemplate;
pub use plugins::{Plugin, Plugins};
pub use registry::RouteRegistry;
pub use route::{Action, EnterHook, ExitHook, RouteEntry, RunOutcome};
pub use state::{NavigationState, RouterSnapshot};

/// Crate version, reported by [`Router::inspect_state`]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
