//! Pattern registry
//!
//! Maps the literal pattern string to its entry. Lookups are by exact
//! pattern text; `"/a(/b)"` and `"/a/b"` are different keys even though they
//! can match the same path. Registration order is kept because matching walks
//! entries in that order.

use crate::error::RouterError;
use crate::pattern::RouteTemplate;
use crate::route::RouteEntry;
use crate::trace_log;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct RouteRegistry {
    entries: Vec<Rc<RouteEntry>>,
    index: HashMap<String, usize>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `pattern`, creating it on first registration.
    ///
    /// Registering the same pattern again hands back the existing entry with
    /// its hooks intact. A malformed pattern is rejected here and nothing is
    /// stored.
    pub fn register(&mut self, pattern: &str) -> Result<Rc<RouteEntry>, RouterError> {
        if let Some(&slot) = self.index.get(pattern) {
            return Ok(self.entries[slot].clone());
        }

        let template = RouteTemplate::parse(pattern)?;
        trace_log!(
            "Registering pattern '{}' with variants {:?}",
            pattern,
            template.variants()
        );

        let entry = Rc::new(RouteEntry::new(template));
        self.index.insert(pattern.to_string(), self.entries.len());
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Get the entry registered under exactly this pattern
    pub fn get(&self, pattern: &str) -> Option<Rc<RouteEntry>> {
        self.index.get(pattern).map(|&slot| self.entries[slot].clone())
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.index.contains_key(pattern)
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<RouteEntry>> {
        self.entries.iter()
    }

    /// Patterns in registration order
    pub fn patterns(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.pattern().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
