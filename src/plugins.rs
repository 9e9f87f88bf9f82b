//! Global plugins
//!
//! A plugin sees every matched entry before its enter hooks run and can veto
//! the transition by returning [`Flow::Halt`]. Plugins run in the order their
//! names were first registered.

use crate::lifecycle::Flow;
use crate::route::RouteEntry;
use std::fmt;
use std::rc::Rc;

pub type Plugin = Rc<dyn Fn(&RouteEntry) -> Flow>;

#[derive(Default)]
pub struct Plugins {
    plugins: Vec<(String, Plugin)>,
}

impl Plugins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin under `name`.
    ///
    /// Re-using a name swaps the callback in place, keeping its position.
    pub fn register(&mut self, name: impl Into<String>, plugin: Plugin) {
        let name = name.into();
        match self.plugins.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = plugin,
            None => self.plugins.push((name, plugin)),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.plugins.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Ordered copy of the plugins, safe to call without holding a borrow
    pub fn snapshot(&self) -> Vec<(String, Plugin)> {
        self.plugins.clone()
    }

    /// Run plugins in order against `entry`.
    ///
    /// Returns the name of the first plugin that halted, if any.
    pub fn run(plugins: &[(String, Plugin)], entry: &RouteEntry) -> Option<String> {
        plugins
            .iter()
            .find(|(_, plugin)| plugin(entry).is_halt())
            .map(|(name, _)| name.clone())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for Plugins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugins")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::RouteTemplate;
    use std::cell::RefCell;

    fn entry() -> RouteEntry {
        RouteEntry::new(RouteTemplate::parse("/x").unwrap())
    }

    #[test]
    fn test_register_order() {
        let mut plugins = Plugins::new();
        plugins.register("auth", Rc::new(|_: &RouteEntry| Flow::Continue));
        plugins.register("analytics", Rc::new(|_: &RouteEntry| Flow::Continue));
        assert_eq!(plugins.names(), vec!["auth", "analytics"]);
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut plugins = Plugins::new();
        plugins.register("a", Rc::new(|_: &RouteEntry| Flow::Continue));
        plugins.register("b", Rc::new(|_: &RouteEntry| Flow::Continue));
        plugins.register("a", Rc::new(|_: &RouteEntry| Flow::Halt));

        assert_eq!(plugins.names(), vec!["a", "b"]);
        assert_eq!(
            Plugins::run(&plugins.snapshot(), &entry()),
            Some("a".to_string())
        );
    }

    #[test]
    fn test_run_stops_at_first_halt() {
        let mut plugins = Plugins::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        for (name, flow) in [("one", Flow::Continue), ("two", Flow::Halt), ("three", Flow::Continue)] {
            let calls = calls.clone();
            plugins.register(
                name,
                Rc::new(move |_: &RouteEntry| {
                    calls.borrow_mut().push(name);
                    flow
                }),
            );
        }

        let vetoed = Plugins::run(&plugins.snapshot(), &entry());
        assert_eq!(vetoed.as_deref(), Some("two"));
        assert_eq!(*calls.borrow(), vec!["one", "two"]);
    }

    #[test]
    fn test_run_all_continue() {
        let mut plugins = Plugins::new();
        plugins.register("ok", Rc::new(|_: &RouteEntry| Flow::Continue));
        assert_eq!(Plugins::run(&plugins.snapshot(), &entry()), None);
    }
}
