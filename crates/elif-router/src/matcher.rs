//! Interpreted lookups over the route trie

use crate::config::FindOptions;
use crate::params::Params;
use crate::pattern::{normalize_path, split_path};
use crate::tree::{normalize_method, NodeId, Registration, Router, ROOT};
use serde::Serialize;
use std::collections::BTreeMap;

/// A route matched by a lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRoute<'a, T> {
    /// Payload the route was registered with
    pub data: &'a T,
    /// Extracted parameters, `None` for routes without parameters or when
    /// extraction was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl<'a, T> MatchedRoute<'a, T> {
    pub(crate) fn new(registration: &'a Registration<T>, segments: &[&str], ignore_params: bool) -> Self {
        let params = if ignore_params || !registration.plan.has_params() {
            None
        } else {
            Some(registration.plan.extract(segments))
        };
        Self {
            data: &registration.data,
            params,
        }
    }
}

type Methods<T> = BTreeMap<String, Vec<Registration<T>>>;

/// Exact-method registrations in insertion order, then any-method ones
fn candidates<'r, T>(methods: &'r Methods<T>, method: &str) -> impl Iterator<Item = &'r Registration<T>> {
    let exact = if method.is_empty() {
        None
    } else {
        methods.get(method)
    };
    exact
        .into_iter()
        .flatten()
        .chain(methods.get("").into_iter().flatten())
}

fn select<'r, T>(
    methods: &'r Methods<T>,
    method: &str,
    segments: &[&str],
    fallback: bool,
) -> Option<&'r Registration<T>> {
    candidates(methods, method).find(|registration| registration.plan.accepts(segments, fallback))
}

fn collect<'r, T>(
    methods: &'r Methods<T>,
    method: &str,
    segments: &[&str],
    fallback: bool,
    out: &mut Vec<&'r Registration<T>>,
) {
    out.extend(candidates(methods, method).filter(|registration| registration.plan.accepts(segments, fallback)));
}

impl<T> Router<T> {
    /// Find the best route for `method` and `path`.
    ///
    /// Exact static paths are answered from the static index. Otherwise the
    /// trie is walked preferring static children, then the parametric child,
    /// then the wildcard child.
    pub fn find_route(&self, method: &str, path: &str, options: &FindOptions) -> Option<MatchedRoute<'_, T>> {
        let method = normalize_method(method);
        let path = normalize_path(path);

        if let Some(&id) = self.statics.get(path) {
            if let Some(registration) = candidates(&self.node(id).methods, &method).next() {
                return Some(MatchedRoute {
                    data: &registration.data,
                    params: None,
                });
            }
        }

        let segments = split_path(path);
        let registration = self.lookup(ROOT, &method, &segments, 0)?;
        Some(MatchedRoute::new(registration, &segments, options.ignore_params))
    }

    fn lookup(&self, id: NodeId, method: &str, segments: &[&str], depth: usize) -> Option<&Registration<T>> {
        let node = self.node(id);

        if depth == segments.len() {
            if let Some(found) = select(&node.methods, method, segments, false) {
                return Some(found);
            }
            // `/test` also matches `/test/*` and `/test/**` when their tail is optional
            if let Some(param) = node.param {
                if let Some(found) = select(&self.node(param).methods, method, segments, true) {
                    return Some(found);
                }
            }
            return node
                .wildcard
                .and_then(|wildcard| select(&self.node(wildcard).methods, method, segments, true));
        }

        if let Some(&child) = node.statics.get(segments[depth]) {
            if let Some(found) = self.lookup(child, method, segments, depth + 1) {
                return Some(found);
            }
        }

        if let Some(param) = node.param {
            if let Some(found) = self.lookup(param, method, segments, depth + 1) {
                return Some(found);
            }
        }

        node.wildcard
            .and_then(|wildcard| select(&self.node(wildcard).methods, method, segments, false))
    }

    /// Find every route matching `method` and `path`, from the least to the
    /// most specific.
    pub fn find_all_routes(&self, method: &str, path: &str) -> Vec<MatchedRoute<'_, T>> {
        let method = normalize_method(method);
        let segments = split_path(normalize_path(path));

        let mut found = Vec::new();
        self.collect_all(ROOT, &method, &segments, 0, &mut found);

        found
            .into_iter()
            .map(|registration| MatchedRoute::new(registration, &segments, false))
            .collect()
    }

    fn collect_all<'r>(
        &'r self,
        id: NodeId,
        method: &str,
        segments: &[&str],
        depth: usize,
        out: &mut Vec<&'r Registration<T>>,
    ) {
        let node = self.node(id);
        let exhausted = depth == segments.len();

        if let Some(wildcard) = node.wildcard {
            collect(&self.node(wildcard).methods, method, segments, exhausted, out);
        }

        if let Some(param) = node.param {
            if exhausted {
                collect(&self.node(param).methods, method, segments, true, out);
            } else {
                self.collect_all(param, method, segments, depth + 1, out);
            }
        }

        if exhausted {
            collect(&node.methods, method, segments, false, out);
        } else if let Some(&child) = node.statics.get(segments[depth]) {
            self.collect_all(child, method, segments, depth + 1, out);
        }
    }
}
