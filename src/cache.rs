//! Parsed path caching
//!
//! Every dispatch resolves two paths (the new one and the one being left),
//! and hosts that poll dispatch the same path over and over. Caching the URL
//! parse keeps that cheap. Entries are evicted least-recently-used first.

use crate::matcher::ParsedPath;
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from raw request path to its parsed form
#[derive(Debug)]
pub struct ParseCache {
    entries: LruCache<String, ParsedPath>,
    stats: CacheStats,
}

impl ParseCache {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, path: &str) -> Option<ParsedPath> {
        if let Some(parsed) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Parse cache hit for '{}'", path);
            Some(parsed.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    pub fn insert(&mut self, path: String, parsed: ParsedPath) {
        self.entries.push(path, parsed);
    }

    pub fn clear(&mut self) {
        trace_log!("Clearing parse cache");
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}
