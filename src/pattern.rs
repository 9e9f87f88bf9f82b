//! Route pattern parsing
//!
//! A pattern is a path with optional trailing groups in parentheses and
//! `:name` parameter segments:
//!
//! ```text
//! /archive(/:year)(/:month)
//! ```
//!
//! Parsing expands the optional groups into concrete *variants*, shortest
//! first, each one extending the previous:
//!
//! ```text
//! /archive
//! /archive/:year
//! /archive/:year/:month
//! ```
//!
//! Groups cannot nest, cannot be empty, and nothing but further groups may
//! follow the first one. Anything else is rejected when the route is
//! registered, never at match time.

use crate::error::RouterError;
use std::fmt;

/// Parsed, immutable form of a registered pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    pattern: String,
    variants: Vec<String>,
}

impl RouteTemplate {
    /// Parse a pattern into its variants.
    ///
    /// # Example
    ///
    /// ```
    /// use pathnav::RouteTemplate;
    ///
    /// let template = RouteTemplate::parse("/a(/b)(/c)").unwrap();
    /// assert_eq!(template.variants(), ["/a", "/a/b", "/a/b/c"]);
    ///
    /// assert!(RouteTemplate::parse("/a(/b").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let mut base: Option<&str> = None;
        let mut groups: Vec<&str> = Vec::new();
        let mut open: Option<usize> = None;

        let bytes = pattern.as_bytes();
        for (i, c) in pattern.char_indices() {
            if base.is_some() && open.is_none() && !matches!(c, '(' | ')') {
                return Err(RouterError::malformed(
                    pattern,
                    i,
                    "literal text after an optional group",
                ));
            }
            match c {
                '(' => {
                    if open.is_some() {
                        return Err(RouterError::malformed(
                            pattern,
                            i,
                            "nested optional groups are not supported",
                        ));
                    }
                    if base.is_none() {
                        base = Some(&pattern[..i]);
                    }
                    open = Some(i);
                }
                ')' => {
                    let Some(start) = open.take() else {
                        return Err(RouterError::malformed(pattern, i, "unmatched ')'"));
                    };
                    let group = &pattern[start + 1..i];
                    if group.is_empty() {
                        return Err(RouterError::malformed(
                            pattern,
                            start,
                            "empty optional group",
                        ));
                    }
                    groups.push(group);
                }
                ':' => {
                    let next = bytes.get(i + 1).copied();
                    if matches!(next, None | Some(b'/' | b'(' | b')')) {
                        return Err(RouterError::malformed(pattern, i, "empty parameter name"));
                    }
                }
                _ => {}
            }
        }

        if let Some(start) = open {
            return Err(RouterError::malformed(
                pattern,
                start,
                "unclosed optional group",
            ));
        }

        let mut variants = Vec::with_capacity(groups.len() + 1);
        variants.push(base.unwrap_or(pattern).to_string());
        for group in groups {
            let extended = format!("{}{}", variants[variants.len() - 1], group);
            variants.push(extended);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            variants,
        })
    }

    /// The pattern exactly as registered
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Concrete paths implied by the optional groups, shortest first.
    ///
    /// Never empty; the first element is the pattern with every group removed.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// The pattern with all optional groups removed
    pub fn base(&self) -> &str {
        &self.variants[0]
    }

    /// Number of optional groups
    pub fn optional_count(&self) -> usize {
        self.variants.len() - 1
    }

    /// Whether the longest variant has any `:name` segment
    pub fn has_params(&self) -> bool {
        self.variants
            .last()
            .is_some_and(|longest| longest.split('/').any(|s| s.starts_with(':')))
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(pattern: &str) -> (usize, &'static str) {
        match RouteTemplate::parse(pattern) {
            Err(RouterError::MalformedPattern {
                position, reason, ..
            }) => (position, reason),
            other => panic!("expected MalformedPattern for {pattern}, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_pattern() {
        let template = RouteTemplate::parse("/users").unwrap();
        assert_eq!(template.variants(), ["/users"]);
        assert_eq!(template.optional_count(), 0);
        assert_eq!(template.base(), "/users");
        assert!(!template.has_params());
    }

    #[test]
    fn test_optional_groups_expand_shortest_first() {
        let template = RouteTemplate::parse("/a(/b)(/c)").unwrap();
        assert_eq!(template.variants(), ["/a", "/a/b", "/a/b/c"]);
        assert_eq!(template.optional_count(), 2);
    }

    #[test]
    fn test_variants_strictly_grow() {
        for pattern in ["/x(/y)", "/archive(/:year)(/:month)(/:day)", "(/root)", "/p/:id(/edit)"] {
            let template = RouteTemplate::parse(pattern).unwrap();
            let variants = template.variants();
            assert_eq!(variants.len(), pattern.matches('(').count() + 1);
            assert!(!variants[0].contains('(') && !variants[0].contains(')'));
            for pair in variants.windows(2) {
                assert!(pair[1].len() > pair[0].len());
                assert!(pair[1].starts_with(pair[0].as_str()));
            }
        }
    }

    #[test]
    fn test_params_detected() {
        let template = RouteTemplate::parse("/archive(/:year)").unwrap();
        assert!(template.has_params());
        assert_eq!(template.variants(), ["/archive", "/archive/:year"]);
    }

    #[test]
    fn test_group_only_pattern() {
        let template = RouteTemplate::parse("(/home)").unwrap();
        assert_eq!(template.variants(), ["", "/home"]);
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(reason("/a(/b"), (2, "unclosed optional group"));
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(reason("/a/b)"), (4, "unmatched ')'"));
    }

    #[test]
    fn test_nested_group() {
        assert_eq!(reason("/a(/b(/c))"), (5, "nested optional groups are not supported"));
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(reason("/a()"), (2, "empty optional group"));
    }

    #[test]
    fn test_text_after_group() {
        assert_eq!(reason("/a(/b)/c"), (6, "literal text after an optional group"));
    }

    #[test]
    fn test_empty_param_name() {
        assert_eq!(reason("/users/:"), (7, "empty parameter name"));
        assert_eq!(reason("/users/:/edit"), (7, "empty parameter name"));
    }

    #[test]
    fn test_display_is_pattern() {
        let template = RouteTemplate::parse("/a(/b)").unwrap();
        assert_eq!(template.to_string(), "/a(/b)");
        assert_eq!(template.pattern(), "/a(/b)");
    }
}
