//! Control-flow result for enter hooks and plugins

/// Result of an enter hook or plugin.
///
/// Returning [`Flow::Halt`] from an enter hook skips the remaining hooks and
/// the action. Returning it from a plugin vetoes the whole transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Carry on with the transition
    #[default]
    Continue,

    /// Stop here
    Halt,
}

impl Flow {
    /// Continue unless `condition` is false.
    ///
    /// Handy for predicate-style hooks:
    ///
    /// ```
    /// use pathnav::Flow;
    ///
    /// let logged_in = false;
    /// assert_eq!(Flow::when(logged_in), Flow::Halt);
    /// ```
    pub fn when(condition: bool) -> Self {
        if condition {
            Flow::Continue
        } else {
            Flow::Halt
        }
    }

    /// Check if the flow allows continuation
    pub fn allows_continue(self) -> bool {
        matches!(self, Flow::Continue)
    }

    /// Check if the flow halts
    pub fn is_halt(self) -> bool {
        matches!(self, Flow::Halt)
    }
}

impl From<()> for Flow {
    fn from((): ()) -> Self {
        Flow::Continue
    }
}
