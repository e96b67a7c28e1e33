//! Single regular expressions for route patterns
//!
//! [`route_to_regexp`] translates one pattern into an anchored regex with a
//! named group per parameter. It follows the same grammar as the trie, which
//! makes it a convenient oracle for the matcher and a one-pass matcher for
//! callers that only need a single route.

use crate::error::{RouterError, RouterResult};
use crate::params::Params;
use crate::pattern::{self, Edge};
use regex::Regex;
use std::fmt;

/// A compiled route pattern
#[derive(Debug, Clone)]
pub struct RouteRegex {
    source: String,
    alternatives: Vec<Regex>,
}

impl RouteRegex {
    /// The regex source; group expansions are joined as `^(?:a|b)/?$`
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled regex when the pattern has a single expansion
    pub fn as_regex(&self) -> Option<&Regex> {
        match self.alternatives.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// One compiled regex per expansion of the pattern
    pub fn alternatives(&self) -> &[Regex] {
        &self.alternatives
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.alternatives.iter().any(|re| re.is_match(path))
    }

    /// Named groups of the first matching expansion
    pub fn captures(&self, path: &str) -> Option<Params> {
        self.alternatives.iter().find_map(|re| {
            let caps = re.captures(path)?;
            let mut params = Params::new();
            for name in re.capture_names().flatten() {
                if let Some(m) = caps.name(name) {
                    params.insert(name, m.as_str());
                }
            }
            Some(params)
        })
    }
}

impl fmt::Display for RouteRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translate a route pattern into an anchored regular expression.
///
/// Every expansion accepts an optional trailing slash. Fails when a group
/// repetition spans segments or the resulting regex does not compile.
pub fn route_to_regexp(pattern: &str) -> RouterResult<RouteRegex> {
    let bodies: Vec<String> = pattern::expand_groups(pattern)?
        .iter()
        .map(|expanded| regex_body(expanded))
        .collect();

    let alternatives = bodies
        .iter()
        .map(|body| {
            Regex::new(&format!("^{body}/?$")).map_err(|source| RouterError::InvalidRegex {
                segment: pattern.to_string(),
                source,
            })
        })
        .collect::<RouterResult<Vec<_>>>()?;

    let source = match bodies.as_slice() {
        [body] => format!("^{body}/?$"),
        _ => format!("^(?:{})/?$", bodies.join("|")),
    };

    Ok(RouteRegex {
        source,
        alternatives,
    })
}

fn regex_body(path: &str) -> String {
    let mut unnamed = 0usize;
    let mut body = String::new();

    for segment in pattern::split_path(path) {
        if let Some(param) = pattern::optional_param(segment) {
            let inner = pattern::segment_regex_source(param, &mut unnamed);
            body.push_str(&format!("(?:/{inner})?"));
            continue;
        }

        match pattern::edge_kind(segment) {
            Edge::Static(text) => {
                body.push('/');
                body.push_str(&regex::escape(&text));
            }
            Edge::CatchAll { name, optional: true } => {
                body.push_str(&format!("(?:/|$)(?<{name}>.*?)"));
            }
            Edge::CatchAll { name, optional: false } => {
                body.push_str(&format!("/(?<{name}>.+?)"));
            }
            Edge::Repeated {
                name,
                pattern,
                optional,
            } => {
                let repeated = pattern::repeated_source(pattern);
                if optional {
                    body.push_str(&format!("(?:/|$)(?<{name}>(?:{repeated})?)"));
                } else {
                    body.push_str(&format!("/(?<{name}>{repeated})"));
                }
            }
            Edge::Param if segment == "*" => {
                body.push_str(&format!("/(?<_{unnamed}>[^/]*)"));
                unnamed += 1;
            }
            Edge::Param => {
                body.push('/');
                body.push_str(&pattern::segment_regex_source(segment, &mut unnamed));
            }
        }
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources() {
        let cases = [
            ("/path", r"^/path/?$"),
            ("/path/:param", r"^/path/(?<param>[^/]+)/?$"),
            ("/path/*/foo", r"^/path/(?<_0>[^/]*)/foo/?$"),
            ("/path/**", r"^/path(?:/|$)(?<_>.*?)/?$"),
            ("/base/**:path", r"^/base/(?<path>.+?)/?$"),
            ("/path/:id?", r"^/path(?:/(?<id>[^/]+))?/?$"),
            ("/path/:rest+", r"^/path/(?<rest>[^/]+(?:/[^/]+)*)/?$"),
            ("/", r"^/?$"),
        ];
        for (pattern, expected) in cases {
            assert_eq!(route_to_regexp(pattern).unwrap().as_str(), expected, "{pattern}");
        }
    }

    #[test]
    fn test_group_alternatives() {
        let re = route_to_regexp("/book{s}?").unwrap();
        assert_eq!(re.as_str(), r"^(?:/books|/book)/?$");
        assert_eq!(re.alternatives().len(), 2);
        assert!(re.as_regex().is_none());
        assert!(re.is_match("/book"));
        assert!(re.is_match("/books/"));
        assert!(!re.is_match("/bookss"));
    }

    #[test]
    fn test_repeated_alternatives_share_names() {
        let re = route_to_regexp("/users/:id{.json}?").unwrap();
        let params = re.captures("/users/42.json").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        let params = re.captures("/users/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn test_display_and_single_regex() {
        let re = route_to_regexp("/a/:b").unwrap();
        assert_eq!(re.to_string(), re.as_str());
        assert_eq!(re.as_regex().unwrap().as_str(), re.as_str());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        assert!(matches!(
            route_to_regexp("/:id/:id"),
            Err(RouterError::InvalidRegex { .. })
        ));
    }
}
