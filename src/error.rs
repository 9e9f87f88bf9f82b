//! Error handling for the router
//!
//! Two kinds of results come out of the router:
//!
//! - [`RouterError`] for genuine failures (a pattern that cannot be parsed, a
//!   path that is not a URL). These propagate through `Result`.
//! - [`DispatchOutcome`] for the normal ways a dispatch can end, including
//!   the ones that run no action (veto, halt, rescue). These are values, not
//!   errors.

use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while registering patterns or resolving paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A registered pattern has invalid optional-group or parameter syntax.
    #[error("malformed route pattern '{pattern}' at byte {position}: {reason}")]
    MalformedPattern {
        /// The pattern as passed to registration
        pattern: String,
        /// Byte offset where parsing failed
        position: usize,
        /// What was wrong
        reason: &'static str,
    },

    /// A path handed to `match`/`dispatch` could not be parsed as a URL.
    #[error("invalid path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The configured origin is not an absolute URL.
    #[error("invalid origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
}

impl RouterError {
    pub(crate) fn malformed(pattern: &str, position: usize, reason: &'static str) -> Self {
        Self::MalformedPattern {
            pattern: pattern.to_string(),
            position,
            reason,
        }
    }

    /// Check if this error came from pattern registration
    pub fn is_malformed_pattern(&self) -> bool {
        matches!(self, RouterError::MalformedPattern { .. })
    }

    /// Check if this error came from path parsing
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, RouterError::InvalidPath { .. })
    }
}

// ============================================================================
// Dispatch outcomes
// ============================================================================

/// How a single call to `Router::dispatch` ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Route matched, every plugin and enter hook continued, action (if any) ran.
    Completed,

    /// Route matched and plugins passed, but an enter hook halted before the action.
    Halted {
        /// Index of the enter hook that halted
        hook: usize,
    },

    /// A plugin vetoed the transition after the exit hook and events had run.
    Vetoed {
        /// Name the plugin was registered under
        plugin: String,
    },

    /// No route matched and the rescue callback ran.
    Rescued,

    /// No route matched and no rescue callback is configured.
    Unmatched,

    /// The path equals the current path; nothing happened.
    Unchanged,

    /// The router is silent; nothing happened.
    Silenced,

    /// Requested while another dispatch was running; queued until it finishes.
    Deferred,
}

impl DispatchOutcome {
    /// Whether the transition went through to the entering stage.
    ///
    /// This is what gates pushing a history entry: `Completed` and `Halted`
    /// both count, since a halting enter hook still leaves the router on the
    /// new route.
    pub fn committed(&self) -> bool {
        matches!(self, DispatchOutcome::Completed | DispatchOutcome::Halted { .. })
    }

    /// Check if the route's action ran (or the route has no action and nothing halted)
    pub fn is_completed(&self) -> bool {
        matches!(self, DispatchOutcome::Completed)
    }

    /// Check if a plugin vetoed the transition
    pub fn is_vetoed(&self) -> bool {
        matches!(self, DispatchOutcome::Vetoed { .. })
    }

    /// Check if no route matched, whether or not rescue ran
    pub fn is_no_match(&self) -> bool {
        matches!(self, DispatchOutcome::Rescued | DispatchOutcome::Unmatched)
    }
}

// ============================================================================
// Tests
// ============================================================================
