//! Path matching
//!
//! Matching is deliberately simple and order-driven:
//!
//! - entries are tried in registration order, and for each entry its
//!   variants shortest first
//! - the first variant that matches wins; there is no specificity ranking,
//!   so more specific patterns must be registered before overlapping ones
//! - `:name` segments are positional and match any non-empty segment
//! - everything else must match literally, with the same number of segments
//!
//! Query string pairs are folded into the parameters of whichever entry
//! matches (last value wins for repeated keys), and path parameters override
//! query keys of the same name.

use crate::error::RouterError;
use crate::params::RouteParams;
use crate::route::RouteEntry;
use crate::trace_log;
use std::rc::Rc;
use url::Url;

/// A request path resolved against the router's origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// Percent-encoded path component, always starting with `/`
    pub pathname: String,
    /// Flat query mapping, last value per key
    pub query: RouteParams,
}

impl ParsedPath {
    /// Resolve `path` (absolute URL or relative reference) against `base`.
    ///
    /// # Example
    ///
    /// ```
    /// use pathnav::ParsedPath;
    /// use url::Url;
    ///
    /// let base = Url::parse("http://localhost").unwrap();
    /// let parsed = ParsedPath::parse(&base, "/users/42?tab=posts&tab=likes").unwrap();
    ///
    /// assert_eq!(parsed.pathname, "/users/42");
    /// assert_eq!(parsed.query.get("tab"), Some("likes"));
    /// ```
    pub fn parse(base: &Url, path: &str) -> Result<Self, RouterError> {
        let url = base.join(path).map_err(|source| RouterError::InvalidPath {
            path: path.to_string(),
            source,
        })?;

        let query = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Ok(Self {
            pathname: url.path().to_string(),
            query,
        })
    }
}

/// Compare one concrete variant against a pathname.
///
/// On success the captured `:name` values have been written into `params`.
/// On failure `params` may hold partial captures and should be discarded.
pub fn match_variant(variant: &str, pathname: &str, params: &mut RouteParams) -> bool {
    if !variant.contains(':') {
        return variant == pathname;
    }

    let pattern_segments: Vec<&str> = variant.split('/').collect();
    let path_segments: Vec<&str> = pathname.split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return false;
    }

    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        match expected.strip_prefix(':') {
            Some(name) if !actual.is_empty() => params.insert(name, *actual),
            _ if expected == actual => {}
            _ => return false,
        }
    }
    true
}

/// Find the first entry with a variant matching `parsed`.
///
/// With `extract` set, the winning entry's parameters are replaced by the
/// query pairs plus captured segments. Without it, no entry is touched.
pub fn match_path<'a, I>(entries: I, parsed: &ParsedPath, extract: bool) -> Option<Rc<RouteEntry>>
where
    I: IntoIterator<Item = &'a Rc<RouteEntry>>,
{
    for entry in entries {
        for variant in entry.template().variants() {
            let mut params = parsed.query.clone();
            trace_log!("Trying variant '{}' against '{}'", variant, parsed.pathname);
            if match_variant(variant, &parsed.pathname, &mut params) {
                if extract {
                    entry.set_params(params);
                }
                return Some(entry.clone());
            }
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RouteRegistry;

    fn base() -> Url {
        Url::parse("http://localhost").unwrap()
    }

    fn parsed(path: &str) -> ParsedPath {
        ParsedPath::parse(&base(), path).unwrap()
    }

    fn matched(registry: &RouteRegistry, path: &str) -> Option<String> {
        match_path(registry.iter(), &parsed(path), true).map(|e| e.pattern().to_string())
    }

    #[test]
    fn test_static_variant() {
        let mut params = RouteParams::new();
        assert!(match_variant("/about", "/about", &mut params));
        assert!(!match_variant("/about", "/about/", &mut params));
        assert!(!match_variant("/about", "/about/team", &mut params));
        assert!(params.is_empty());
    }

    #[test]
    fn test_param_variant() {
        let mut params = RouteParams::new();
        assert!(match_variant("/users/:id", "/users/42", &mut params));
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn test_param_requires_segment() {
        let mut params = RouteParams::new();
        assert!(!match_variant("/users/:id", "/users", &mut params));
        assert!(!match_variant("/users/:id", "/users/", &mut params));
        assert!(!match_variant("/users/:id", "/users/42/edit", &mut params));
    }

    #[test]
    fn test_param_value_equal_to_literal_segment() {
        // "/p/p" must bind x = "p" without disturbing the literal segment
        let mut params = RouteParams::new();
        assert!(match_variant("/p/:x", "/p/p", &mut params));
        assert_eq!(params.get("x"), Some("p"));
    }

    #[test]
    fn test_multiple_params() {
        let mut params = RouteParams::new();
        assert!(match_variant(
            "/users/:user/posts/:post",
            "/users/7/posts/99",
            &mut params
        ));
        assert_eq!(params.get("user"), Some("7"));
        assert_eq!(params.get("post"), Some("99"));
    }

    #[test]
    fn test_parse_relative_and_absolute() {
        assert_eq!(parsed("users/1").pathname, "/users/1");
        assert_eq!(parsed("https://example.com/x?y=1").pathname, "/x");
        assert_eq!(parsed("").pathname, "/");
    }

    #[test]
    fn test_parse_invalid() {
        let err = ParsedPath::parse(&base(), "http://[::1").unwrap_err();
        assert!(err.is_invalid_path());
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = RouteRegistry::new();
        registry.register("/items/:id").unwrap();
        registry.register("/items/new").unwrap();

        assert_eq!(matched(&registry, "/items/new").as_deref(), Some("/items/:id"));
    }

    #[test]
    fn test_shorter_variant_tried_first() {
        let mut registry = RouteRegistry::new();
        let entry = registry.register("/a(/:b)(/:c)").unwrap();

        assert_eq!(matched(&registry, "/a").as_deref(), Some("/a(/:b)(/:c)"));
        assert!(entry.params().is_empty());

        matched(&registry, "/a/1/2");
        assert_eq!(entry.params().get("b"), Some("1"));
        assert_eq!(entry.params().get("c"), Some("2"));
    }

    #[test]
    fn test_query_params_merged() {
        let mut registry = RouteRegistry::new();
        let entry = registry.register("/users/:id").unwrap();

        matched(&registry, "/users/42?tab=posts");
        let params = entry.params();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("tab"), Some("posts"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_path_param_overrides_query() {
        let mut registry = RouteRegistry::new();
        let entry = registry.register("/users/:id").unwrap();

        matched(&registry, "/users/42?id=7");
        assert_eq!(entry.params().get("id"), Some("42"));
    }

    #[test]
    fn test_no_extract_leaves_params() {
        let mut registry = RouteRegistry::new();
        let entry = registry.register("/users/:id").unwrap();

        matched(&registry, "/users/1");
        let found = match_path(registry.iter(), &parsed("/users/2"), false);
        assert!(found.is_some());
        assert_eq!(entry.params().get("id"), Some("1"));
    }

    #[test]
    fn test_no_match() {
        let mut registry = RouteRegistry::new();
        registry.register("/a(/b)").unwrap();
        assert!(matched(&registry, "/a/c").is_none());
        assert!(matched(&registry, "/b").is_none());
    }
}
