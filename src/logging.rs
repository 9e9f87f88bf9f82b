//! Logging facade
//!
//! The router never talks to a logging backend directly. Every call site goes
//! through the macros below, which forward to whichever backend was enabled at
//! compile time:
//!
//! - `log` (default) - the `log` crate, pair it with `env_logger` or similar
//! - `tracing` - the `tracing` crate, events land in the active subscriber
//!
//! The features are mutually exclusive. With neither enabled the macros expand
//! to nothing.
//!
//! ```ignore
//! use pathnav::{debug_log, trace_log};
//!
//! trace_log!("trying variant '{}'", variant);
//! debug_log!("dispatch {:?} -> {}", from, to);
//! ```

/// Trace-level logging
///
/// Logs per-candidate detail such as each variant tried and parse cache hits.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Debug-level logging
///
/// Logs each transition and how it ended: veto, halt or rescue.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Info-level logging
///
/// Logs host-facing milestones such as the navigator starting to listen.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Warning-level logging
///
/// Logs recoverable anomalies, e.g. deferred dispatches being dropped.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// Error-level logging
///
/// Logs failures that cannot be returned to a caller, such as a dispatch
/// triggered from a host callback.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
