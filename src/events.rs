//! Lifecycle events
//!
//! Subscribers are called synchronously, in subscription order. The bus does
//! not catch anything: a panicking subscriber unwinds straight through
//! [`notify`] and, during a dispatch, through `Router::dispatch`.

use crate::route::RouteEntry;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Fired on every transition, matched or not
pub const ROUTE_CHANGE: &str = "route:change";
/// Fired before the exit hook of the route being left
pub const ROUTE_EXIT: &str = "route:exit";
/// Fired when the new path matched, before plugins run
pub const ROUTE_ENTER: &str = "route:enter";

/// Payload handed to subscribers
#[derive(Clone)]
pub enum RouteEvent {
    /// A transition from `from` (None on the first dispatch) to `to`
    Change { from: Option<String>, to: String },
    /// The entry being left
    Exit(Rc<RouteEntry>),
    /// The entry being entered
    Enter(Rc<RouteEntry>),
    /// Application-defined payload for custom event names
    Custom(String),
}

impl RouteEvent {
    /// The entry carried by `Exit`/`Enter` events
    pub fn entry(&self) -> Option<&Rc<RouteEntry>> {
        match self {
            RouteEvent::Exit(entry) | RouteEvent::Enter(entry) => Some(entry),
            _ => None,
        }
    }
}

impl fmt::Debug for RouteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteEvent::Change { from, to } => f
                .debug_struct("Change")
                .field("from", from)
                .field("to", to)
                .finish(),
            RouteEvent::Exit(entry) => f.debug_tuple("Exit").field(&entry.pattern()).finish(),
            RouteEvent::Enter(entry) => f.debug_tuple("Enter").field(&entry.pattern()).finish(),
            RouteEvent::Custom(data) => f.debug_tuple("Custom").field(data).finish(),
        }
    }
}

pub type Subscriber = Rc<dyn Fn(&RouteEvent)>;

/// Call each subscriber with `data`, in order.
///
/// Takes a snapshot from [`EventBus::subscribers`] rather than the bus, so
/// no borrow of the bus is held while subscribers run.
pub fn notify(subscribers: &[Subscriber], data: &RouteEvent) {
    for subscriber in subscribers {
        subscriber(data);
    }
}

/// Named event channels with ordered subscribers
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<String, Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, event: impl Into<String>, subscriber: Subscriber) {
        self.subscribers
            .entry(event.into())
            .or_default()
            .push(subscriber);
    }

    /// Snapshot of the subscribers for `event`.
    ///
    /// The router calls these after releasing its borrow of the bus, so a
    /// subscriber may subscribe or emit in turn.
    pub fn subscribers(&self, event: &str) -> Vec<Subscriber> {
        self.subscribers.get(event).cloned().unwrap_or_default()
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers.get(event).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(name, subs)| (name.as_str(), subs.len()))
            .collect();
        f.debug_struct("EventBus").field("subscribers", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_notify_in_subscription_order() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let seen = seen.clone();
            bus.on(
                "custom",
                Rc::new(move |event: &RouteEvent| {
                    if let RouteEvent::Custom(data) = event {
                        seen.borrow_mut().push(format!("{tag}:{data}"));
                    }
                }),
            );
        }

        notify(&bus.subscribers("custom"), &RouteEvent::Custom("x".to_string()));
        assert_eq!(*seen.borrow(), vec!["a:x", "b:x", "c:x"]);
    }

    #[test]
    fn test_unknown_event_has_no_subscribers() {
        let bus = EventBus::new();
        assert!(bus.subscribers(ROUTE_CHANGE).is_empty());
        assert_eq!(bus.subscriber_count(ROUTE_CHANGE), 0);
    }

    #[test]
    #[should_panic(expected = "subscriber failed")]
    fn test_subscriber_panic_propagates() {
        let mut bus = EventBus::new();
        bus.on(ROUTE_CHANGE, Rc::new(|_: &RouteEvent| panic!("subscriber failed")));
        notify(
            &bus.subscribers(ROUTE_CHANGE),
            &RouteEvent::Change {
                from: None,
                to: "/".to_string(),
            },
        );
    }
}
