//! Route pattern parsing for elif.rs
//!
//! Turns a route pattern string into classified segments that the trie store
//! walks. The same helpers produce the regular expression fragments used by
//! the regex compiler, so both paths agree on the pattern grammar.
//!
//! Pattern grammar, per segment:
//! - `**` / `**:name` - catch-all remainder
//! - `:name+` / `:name*` / `:name(re)+` - repeated parameter, also a catch-all
//! - `*` - unnamed parameter (`_0`, `_1`, ...)
//! - `:name` - named parameter
//! - anything containing `:`, `(` or `*` - inline regular expression
//! - everything else - static text, `\` escapes the next character
//!
//! `{...}` groups with an optional `?`, `+` or `*` suffix and `:name?`
//! optional parameters are expanded before classification.

use crate::error::{RouterError, RouterResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Parameter name bound by an unnamed catch-all (`**`)
pub(crate) const CATCH_ALL: &str = "_";

static NAMED_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:(\w+)$").expect("static regex is valid"));
static REPEATED_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:(\w+)(?:\((.*)\))?([+*])$").expect("static regex is valid"));
static OPTIONAL_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:\w+(?:\(.*\))?\?$").expect("static regex is valid"));

/// Split a path into its non-empty segments
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Strip a trailing slash unless the path is the root
pub(crate) fn normalize_path(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// Expand the first `{...}` group of a pattern.
///
/// Returns `None` when the pattern has no (closed) group. A group without a
/// modifier is inlined, `?` yields the pattern with and without the group, and
/// `+`/`*` inline the group as a repeated non-capturing regex.
pub(crate) fn expand_group_delimiters(path: &str) -> RouterResult<Option<Vec<String>>> {
    let Some(open) = find_unescaped(path, 0, '{') else {
        return Ok(None);
    };
    let Some(close) = find_unescaped(path, open + 1, '}') else {
        return Ok(None);
    };

    let modifier = path[close + 1..]
        .chars()
        .next()
        .filter(|c| matches!(c, '?' | '+' | '*'));
    let prefix = &path[..open];
    let body = &path[open + 1..close];
    let suffix = &path[close + 1 + modifier.map_or(0, char::len_utf8)..];

    match modifier {
        None => Ok(Some(vec![format!("{prefix}{body}{suffix}")])),
        Some('?') => Ok(Some(vec![
            format!("{prefix}{body}{suffix}"),
            format!("{prefix}{suffix}"),
        ])),
        Some(repeat) => {
            if body.contains('/') {
                return Err(RouterError::unsupported(
                    path,
                    "unsupported group repetition across segments",
                ));
            }
            Ok(Some(vec![format!("{prefix}(?:{body}){repeat}{suffix}")]))
        }
    }
}

/// Expand the first `:name?` optional parameter into the pattern with and
/// without that segment
fn expand_optional_param(path: &str) -> Option<Vec<String>> {
    let parts: Vec<&str> = path.split('/').collect();
    let (index, param) = parts
        .iter()
        .copied()
        .enumerate()
        .find_map(|(i, part)| optional_param(part).map(|param| (i, param)))?;

    let mut with = parts.clone();
    with[index] = param;

    let mut without = parts;
    without.remove(index);
    let without = without.join("/");

    Some(vec![
        with.join("/"),
        if without.is_empty() { "/".to_string() } else { without },
    ])
}

/// The parameter of a `:name?` segment without its `?` modifier
pub(crate) fn optional_param(segment: &str) -> Option<&str> {
    OPTIONAL_PARAM
        .is_match(segment)
        .then(|| &segment[..segment.len() - 1])
}

/// Fully expand group delimiters only
pub(crate) fn expand_groups(path: &str) -> RouterResult<Vec<String>> {
    match expand_group_delimiters(path)? {
        Some(expanded) => {
            let mut patterns = Vec::new();
            for pattern in expanded {
                patterns.extend(expand_groups(&pattern)?);
            }
            Ok(patterns)
        }
        None => Ok(vec![path.to_string()]),
    }
}

/// Fully expand group delimiters and optional parameters into the concrete
/// patterns inserted into the trie
pub(crate) fn expand_pattern(path: &str) -> RouterResult<Vec<String>> {
    let mut patterns = Vec::new();
    for grouped in expand_groups(path)? {
        match expand_optional_param(&grouped) {
            Some(expanded) => {
                for pattern in expanded {
                    patterns.extend(expand_pattern(&pattern)?);
                }
            }
            None => patterns.push(grouped),
        }
    }
    Ok(patterns)
}

/// Find `target` outside of parentheses, skipping escaped characters
fn find_unescaped(path: &str, from: usize, target: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = path[from..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            c if c == target && depth == 0 => return Some(from + i),
            _ => {}
        }
    }
    None
}

fn has_unescaped(segment: &str, target: char) -> bool {
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == target {
            return true;
        }
    }
    false
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Remove escaping backslashes from a static segment
fn unescape_static(segment: &str) -> Cow<'_, str> {
    if !segment.contains('\\') {
        return Cow::Borrowed(segment);
    }
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) if !next.is_ascii_alphanumeric() => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Structural kind of a raw segment, decided without compiling any regex
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Edge<'a> {
    Static(Cow<'a, str>),
    Param,
    CatchAll {
        name: &'a str,
        optional: bool,
    },
    Repeated {
        name: &'a str,
        pattern: Option<&'a str>,
        optional: bool,
    },
}

/// Classify one raw segment by its syntax
pub(crate) fn edge_kind(segment: &str) -> Edge<'_> {
    if let Some(rest) = segment.strip_prefix("**") {
        let name = rest
            .strip_prefix(':')
            .filter(|name| !name.is_empty())
            .unwrap_or(CATCH_ALL);
        return Edge::CatchAll {
            name,
            optional: rest.is_empty(),
        };
    }

    if let Some(caps) = REPEATED_PARAM.captures(segment) {
        if let (Some(name), Some(modifier)) = (caps.get(1), caps.get(3)) {
            return Edge::Repeated {
                name: name.as_str(),
                pattern: caps.get(2).map(|m| m.as_str()),
                optional: modifier.as_str() == "*",
            };
        }
    }

    if segment == "*"
        || has_unescaped(segment, ':')
        || has_unescaped(segment, '(')
        || has_unescaped(segment, '*')
    {
        return Edge::Param;
    }

    Edge::Static(unescape_static(segment))
}

/// Translate an inline segment pattern into a regex fragment (no anchors).
///
/// `:name` becomes a named group, `:name(re)` a named group around `re`,
/// `(re)` an unnamed numbered group, `*` an unnamed group of non-slash
/// characters. Text outside groups is literal. `unnamed` carries the counter
/// for unnamed groups across the whole pattern.
pub(crate) fn segment_regex_source(segment: &str, unnamed: &mut usize) -> String {
    let mut out = String::with_capacity(segment.len() + 16);
    let mut depth = 0usize;
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        if depth > 0 {
            match c {
                '\\' => {
                    out.push(c);
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '(' => {
                    depth += 1;
                    out.push(c);
                }
                ')' => {
                    depth -= 1;
                    out.push(c);
                    if depth == 0 {
                        if let Some(q) = chars.next_if(|q| matches!(q, '?' | '+' | '*')) {
                            out.push(q);
                        }
                    }
                }
                c => out.push(c),
            }
            continue;
        }

        match c {
            '\\' => match chars.next() {
                Some(next) if next.is_ascii_alphanumeric() => {
                    out.push('\\');
                    out.push(next);
                }
                Some(next) => push_literal(&mut out, next),
                None => out.push_str(r"\\"),
            },
            ':' if chars.peek().is_some_and(|n| is_word(*n)) => {
                let mut name = String::new();
                while let Some(n) = chars.next_if(|n| is_word(*n)) {
                    name.push(n);
                }
                if chars.next_if_eq(&'(').is_some() {
                    out.push_str(&format!("(?<{name}>"));
                    depth = 1;
                } else {
                    out.push_str(&format!("(?<{name}>[^/]+)"));
                }
            }
            '(' => {
                depth = 1;
                if chars.peek() == Some(&'?') {
                    out.push('(');
                } else {
                    out.push_str(&format!("(?<_{}>", *unnamed));
                    *unnamed += 1;
                }
            }
            '*' => {
                out.push_str(&format!("(?<_{}>[^/]*)", *unnamed));
                *unnamed += 1;
            }
            c => push_literal(&mut out, c),
        }
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
}

/// Regex fragment matching one or more `/`-joined segments
pub(crate) fn repeated_source(pattern: Option<&str>) -> String {
    match pattern {
        Some(p) => format!("(?:{p})(?:/(?:{p}))*"),
        None => "[^/]+(?:/[^/]+)*".to_string(),
    }
}

fn compile_anchored(segment: &str, source: &str) -> RouterResult<Regex> {
    Regex::new(&format!("^{source}$")).map_err(|source| RouterError::InvalidRegex {
        segment: segment.to_string(),
        source,
    })
}

/// Kind of value a parametric segment binds
#[derive(Debug, Clone)]
pub(crate) enum ParamSegment {
    /// Bare `*`, bound positionally as `_N`
    Unnamed(String),
    /// `:name`
    Named(String),
    /// Inline pattern; its named groups become parameters
    Pattern(Regex),
}

/// One parsed pattern segment
#[derive(Debug, Clone)]
pub(crate) enum Segment {
    Static(String),
    Param(ParamSegment),
    Wildcard {
        name: String,
        optional: bool,
        constraint: Option<Regex>,
    },
}

/// A fully parsed, already expanded pattern
#[derive(Debug, Clone)]
pub(crate) struct ParsedPattern {
    pub(crate) segments: Vec<Segment>,
}

impl ParsedPattern {
    /// Parse an expanded pattern, compiling every inline regex up front
    pub(crate) fn parse(path: &str) -> RouterResult<Self> {
        let mut unnamed = 0usize;
        let mut segments = Vec::new();

        for raw in split_path(path) {
            let segment = match edge_kind(raw) {
                Edge::Static(text) => Segment::Static(text.into_owned()),
                Edge::CatchAll { name, optional } => Segment::Wildcard {
                    name: name.to_string(),
                    optional,
                    constraint: None,
                },
                Edge::Repeated {
                    name,
                    pattern,
                    optional,
                } => {
                    let constraint = match pattern {
                        Some(p) => {
                            let body = repeated_source(Some(p));
                            let source = if optional { format!("(?:{body})?") } else { body };
                            Some(compile_anchored(raw, &source)?)
                        }
                        None => None,
                    };
                    Segment::Wildcard {
                        name: name.to_string(),
                        optional,
                        constraint,
                    }
                }
                Edge::Param => {
                    if raw == "*" {
                        let name = format!("_{unnamed}");
                        unnamed += 1;
                        Segment::Param(ParamSegment::Unnamed(name))
                    } else if let Some(name) = NAMED_PARAM.captures(raw).and_then(|c| c.get(1)) {
                        Segment::Param(ParamSegment::Named(name.as_str().to_string()))
                    } else {
                        let source = segment_regex_source(raw, &mut unnamed);
                        Segment::Param(ParamSegment::Pattern(compile_anchored(raw, &source)?))
                    }
                }
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Normalized path for patterns made only of static segments
    pub(crate) fn static_path(&self) -> Option<String> {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                _ => return None,
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}
