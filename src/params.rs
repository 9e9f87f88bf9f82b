//! Route parameters
//!
//! A single flat mapping holds both the values captured from `:name` segments
//! and the request's query string. Query pairs are loaded first, so a path
//! parameter with the same name as a query key wins.

use std::collections::HashMap;

/// Parameters resolved for a matched route
///
/// # Example
///
/// ```
/// use pathnav::RouteParams;
///
/// // Pattern: /users/:id
/// // Path:    /users/123?tab=posts
/// let mut params = RouteParams::new();
/// params.insert("tab", "posts");
/// params.insert("id", "123");
///
/// assert_eq!(params.get("id"), Some("123"));
/// assert_eq!(params.get_as::<u32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing map
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parse a value with [`FromStr`](std::str::FromStr); `None` when absent
    /// or unparsable
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|raw| raw.parse().ok())
    }

    /// Set `key`, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// The underlying map
    pub fn all(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_overrides_query() {
        // Query first, then captured segments
        let mut params: RouteParams = [("id", "from-query"), ("tab", "posts")].into_iter().collect();
        params.extend([("id", "42")]);

        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("tab"), Some("posts"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_typed_lookup() {
        let params: RouteParams = [("year", "2024"), ("draft", "false"), ("slug", "hello")]
            .into_iter()
            .collect();

        assert_eq!(params.get_as::<u16>("year"), Some(2024));
        assert_eq!(params.get_as::<bool>("draft"), Some(false));
        assert_eq!(params.get_as::<u16>("slug"), None);
        assert_eq!(params.get_as::<u16>("month"), None);
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let params: RouteParams = [("tag", "rust"), ("tag", "router"), ("page", "3")]
            .into_iter()
            .collect();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("tag"), Some("router"));
        assert!(params.contains("page"));
        assert!(!params.contains("tags"));
    }

    #[test]
    fn test_wraps_map() {
        let map = HashMap::from([("section".to_string(), "inbox".to_string())]);
        let params = RouteParams::from_map(map.clone());

        assert_eq!(params.all(), &map);
        assert_eq!(params.iter().count(), 1);
        assert!(!params.is_empty());
        assert!(RouteParams::new().is_empty());
    }
}
