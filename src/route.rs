//! Route entries
//!
//! A [`RouteEntry`] is the behaviour bound to one registered pattern: an
//! optional action, an ordered list of enter hooks, and an optional exit
//! hook. Entries are shared (`Rc`) between the registry and whoever
//! registered them, so the builder methods take `&self` and can be chained
//! on the handle returned by `Router::route`.

use crate::lifecycle::Flow;
use crate::params::RouteParams;
use crate::pattern::RouteTemplate;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Action run with the resolved parameters once all enter hooks continue
pub type Action = Rc<dyn Fn(&RouteParams)>;

/// Hook run before the action; [`Flow::Halt`] skips later hooks and the action
pub type EnterHook = Rc<dyn Fn(&RouteEntry) -> Flow>;

/// Hook run when navigation leaves this entry's route
pub type ExitHook = Rc<dyn Fn(&RouteEntry)>;

/// How an entry's enter/act stage finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every enter hook continued; the action ran if one is set
    Completed,
    /// The enter hook at this index halted; the action was skipped
    Halted(usize),
}

/// Behaviour bound to a registered pattern.
pub struct RouteEntry {
    template: RouteTemplate,
    action: RefCell<Option<Action>>,
    enter_hooks: RefCell<Vec<EnterHook>>,
    exit_hook: RefCell<Option<ExitHook>>,
    params: RefCell<RouteParams>,
}

impl RouteEntry {
    pub(crate) fn new(template: RouteTemplate) -> Self {
        Self {
            template,
            action: RefCell::new(None),
            enter_hooks: RefCell::new(Vec::new()),
            exit_hook: RefCell::new(None),
            params: RefCell::new(RouteParams::new()),
        }
    }

    /// Set the action, replacing any previous one
    ///
    /// # Example
    ///
    /// ```
    /// use pathnav::Router;
    ///
    /// let router = Router::new();
    /// router
    ///     .route("/users/:id")
    ///     .unwrap()
    ///     .to(|params| println!("user {}", params.get("id").unwrap_or("?")));
    /// ```
    pub fn to<F>(&self, action: F) -> &Self
    where
        F: Fn(&RouteParams) + 'static,
    {
        *self.action.borrow_mut() = Some(Rc::new(action));
        self
    }

    /// Append an enter hook
    pub fn enter<F>(&self, hook: F) -> &Self
    where
        F: Fn(&RouteEntry) -> Flow + 'static,
    {
        self.enter_hooks.borrow_mut().push(Rc::new(hook));
        self
    }

    /// Append several enter hooks, keeping their order
    pub fn enter_all<I>(&self, hooks: I) -> &Self
    where
        I: IntoIterator<Item = EnterHook>,
    {
        self.enter_hooks.borrow_mut().extend(hooks);
        self
    }

    /// Set the exit hook, replacing any previous one
    pub fn exit<F>(&self, hook: F) -> &Self
    where
        F: Fn(&RouteEntry) + 'static,
    {
        *self.exit_hook.borrow_mut() = Some(Rc::new(hook));
        self
    }

    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    /// The pattern this entry was registered under
    pub fn pattern(&self) -> &str {
        self.template.pattern()
    }

    /// Parameters from the most recent extracting match against this entry
    pub fn params(&self) -> RouteParams {
        self.params.borrow().clone()
    }

    pub(crate) fn set_params(&self, params: RouteParams) {
        *self.params.borrow_mut() = params;
    }

    pub fn has_action(&self) -> bool {
        self.action.borrow().is_some()
    }

    pub fn has_exit_hook(&self) -> bool {
        self.exit_hook.borrow().is_some()
    }

    pub fn enter_hook_count(&self) -> usize {
        self.enter_hooks.borrow().len()
    }

    /// Run the exit hook, if any. Returns whether one ran.
    pub(crate) fn run_exit(&self) -> bool {
        let hook = self.exit_hook.borrow().clone();
        match hook {
            Some(hook) => {
                hook(self);
                true
            }
            None => false,
        }
    }

    /// Run enter hooks in order, then the action unless a hook halted.
    ///
    /// Hooks and the action are cloned out of their cells before being
    /// called, so they may freely add hooks to or read this entry.
    pub fn run(&self) -> RunOutcome {
        let hooks: Vec<EnterHook> = self.enter_hooks.borrow().clone();
        for (index, hook) in hooks.iter().enumerate() {
            if hook(self).is_halt() {
                return RunOutcome::Halted(index);
            }
        }

        let action = self.action.borrow().clone();
        if let Some(action) = action {
            let params = self.params();
            action(&params);
        }
        RunOutcome::Completed
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern())
            .field("has_action", &self.has_action())
            .field("enter_hooks", &self.enter_hook_count())
            .field("has_exit_hook", &self.has_exit_hook())
            .field("params", &self.params.borrow())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn entry(pattern: &str) -> RouteEntry {
        RouteEntry::new(RouteTemplate::parse(pattern).unwrap())
    }

    #[test]
    fn test_builder_chain() {
        let entry = entry("/users/:id");
        entry
            .to(|_| {})
            .enter(|_| Flow::Continue)
            .enter(|_| Flow::Continue)
            .exit(|_| {});

        assert!(entry.has_action());
        assert!(entry.has_exit_hook());
        assert_eq!(entry.enter_hook_count(), 2);
        assert_eq!(entry.pattern(), "/users/:id");
    }

    #[test]
    fn test_run_passes_params_to_action() {
        let entry = entry("/users/:id");
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        entry.to(move |params| *sink.borrow_mut() = params.get("id").map(str::to_string));

        let mut params = RouteParams::new();
        params.insert("id", "42");
        entry.set_params(params);

        assert_eq!(entry.run(), RunOutcome::Completed);
        assert_eq!(seen.borrow().as_deref(), Some("42"));
    }

    #[test]
    fn test_halting_hook_skips_rest() {
        let entry = entry("/admin");
        let calls = Rc::new(RefCell::new(Vec::new()));

        let log = calls.clone();
        entry.enter(move |_| {
            log.borrow_mut().push("first");
            Flow::Continue
        });
        let log = calls.clone();
        entry.enter(move |_| {
            log.borrow_mut().push("second");
            Flow::Halt
        });
        let log = calls.clone();
        entry.enter(move |_| {
            log.borrow_mut().push("third");
            Flow::Continue
        });
        let log = calls.clone();
        entry.to(move |_| log.borrow_mut().push("action"));

        assert_eq!(entry.run(), RunOutcome::Halted(1));
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_enter_all_keeps_order() {
        let entry = entry("/");
        let order = Rc::new(RefCell::new(Vec::new()));
        let hooks: Vec<EnterHook> = (0..3)
            .map(|i| {
                let order = order.clone();
                Rc::new(move |_: &RouteEntry| {
                    order.borrow_mut().push(i);
                    Flow::Continue
                }) as EnterHook
            })
            .collect();
        entry.enter_all(hooks);

        assert_eq!(entry.run(), RunOutcome::Completed);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_run_without_action_completes() {
        let entry = entry("/empty");
        assert_eq!(entry.run(), RunOutcome::Completed);
    }

    #[test]
    fn test_exit_hook() {
        let entry = entry("/leaving");
        assert!(!entry.run_exit());

        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        entry.exit(move |_| counter.set(counter.get() + 1));

        assert!(entry.run_exit());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_hook_can_register_more_hooks() {
        let entry = entry("/grow");
        entry.enter(|entry| {
            entry.enter(|_| Flow::Continue);
            Flow::Continue
        });

        assert_eq!(entry.run(), RunOutcome::Completed);
        assert_eq!(entry.enter_hook_count(), 2);
    }
}
