//! Trie store for registered routes
//!
//! Nodes live in an arena addressed by [`NodeId`]. Each node has static
//! children keyed by segment text, at most one parametric child and at most
//! one wildcard child. Registrations are kept per method in insertion order,
//! and routes without parameters are additionally indexed by their full path.

use crate::error::RouterResult;
use crate::params::Params;
use crate::pattern::{self, Edge, ParamSegment, ParsedPattern, Segment};
use regex::Regex;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

pub(crate) type NodeId = usize;

/// The root node is allocated first and never released
pub(crate) const ROOT: NodeId = 0;

/// Uppercase a method name, `""` stays the any-method key
pub(crate) fn normalize_method(method: &str) -> Cow<'_, str> {
    if method.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(method.to_ascii_uppercase())
    } else {
        Cow::Borrowed(method)
    }
}

fn with_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Where a parameter value comes from in the split path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentIndex {
    /// A single segment
    At(usize),
    /// Every segment from the index on, joined with `/`
    Rest(usize),
}

impl SegmentIndex {
    pub(crate) fn value(self, segments: &[&str]) -> Option<String> {
        match self {
            SegmentIndex::At(i) => segments.get(i).map(|s| s.to_string()),
            SegmentIndex::Rest(i) => Some(segments[i.min(segments.len())..].join("/")),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ParamKey {
    Name(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub(crate) struct ParamSlot {
    pub(crate) index: SegmentIndex,
    pub(crate) key: ParamKey,
    pub(crate) optional: bool,
}

/// How to validate a path against one registration and recover its params
#[derive(Debug, Clone, Default)]
pub(crate) struct Plan {
    pub(crate) slots: Vec<ParamSlot>,
    pub(crate) constraints: Vec<(SegmentIndex, Regex)>,
}

impl Plan {
    /// Check the inline constraints. A `fallback` match (the path ended one
    /// level above the registration) requires the last parameter to be optional.
    pub(crate) fn accepts(&self, segments: &[&str], fallback: bool) -> bool {
        if fallback && !self.slots.last().is_some_and(|slot| slot.optional) {
            return false;
        }
        self.constraints.iter().all(|(index, re)| match index.value(segments) {
            Some(value) => re.is_match(&value),
            None => false,
        })
    }

    pub(crate) fn extract(&self, segments: &[&str]) -> Params {
        let mut params = Params::new();
        for slot in &self.slots {
            let Some(value) = slot.index.value(segments) else {
                continue;
            };
            match &slot.key {
                ParamKey::Name(name) => params.insert(name.as_str(), value),
                ParamKey::Pattern(re) => {
                    if let Some(caps) = re.captures(&value) {
                        for name in re.capture_names().flatten() {
                            if let Some(m) = caps.name(name) {
                                params.insert(name, m.as_str());
                            }
                        }
                    }
                }
            }
        }
        params
    }

    pub(crate) fn has_params(&self) -> bool {
        !self.slots.is_empty()
    }
}

/// One registered payload with its matching plan
#[derive(Debug, Clone)]
pub(crate) struct Registration<T> {
    pub(crate) data: T,
    pub(crate) plan: Plan,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) key: String,
    pub(crate) statics: BTreeMap<String, NodeId>,
    pub(crate) param: Option<NodeId>,
    pub(crate) wildcard: Option<NodeId>,
    /// Set once an inline-pattern parameter was registered through this node
    pub(crate) has_pattern_param: bool,
    pub(crate) methods: BTreeMap<String, Vec<Registration<T>>>,
}

impl<T> Node<T> {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            statics: BTreeMap::new(),
            param: None,
            wildcard: None,
            has_pattern_param: false,
            methods: BTreeMap::new(),
        }
    }

    pub(crate) fn has_children(&self) -> bool {
        !self.statics.is_empty() || self.param.is_some() || self.wildcard.is_some()
    }

    fn is_empty(&self) -> bool {
        self.methods.is_empty() && !self.has_children()
    }
}

/// A route table mapping `(method, path)` pairs to payloads of type `T`
#[derive(Debug, Clone)]
pub struct Router<T> {
    pub(crate) nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
    pub(crate) statics: HashMap<String, NodeId>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("")],
            free: Vec::new(),
            statics: HashMap::new(),
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    fn alloc(&mut self, key: &str) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Node::new(key);
                id
            }
            None => {
                self.nodes.push(Node::new(key));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        debug!("Pruning empty route node '{}'", self.nodes[id].key);
        self.nodes[id] = Node::new("");
        self.free.push(id);
    }

    fn static_child(&mut self, parent: NodeId, key: String) -> NodeId {
        if let Some(&child) = self.nodes[parent].statics.get(&key) {
            return child;
        }
        let child = self.alloc(&key);
        self.nodes[parent].statics.insert(key, child);
        child
    }

    fn param_child(&mut self, parent: NodeId) -> NodeId {
        if let Some(child) = self.nodes[parent].param {
            return child;
        }
        let child = self.alloc("*");
        self.nodes[parent].param = Some(child);
        child
    }

    fn wildcard_child(&mut self, parent: NodeId) -> NodeId {
        if let Some(child) = self.nodes[parent].wildcard {
            return child;
        }
        let child = self.alloc("**");
        self.nodes[parent].wildcard = Some(child);
        child
    }

    /// Register `data` for `method` and the path pattern.
    ///
    /// `method` is case-insensitive and `""` matches any method. Patterns with
    /// `{...}` groups or optional parameters are expanded and every expansion
    /// gets its own copy of `data`. All expansions are parsed before the trie
    /// is touched, so an error leaves the router unchanged.
    pub fn add_route(&mut self, method: &str, path: &str, data: T) -> RouterResult<()>
    where
        T: Clone,
    {
        let method = normalize_method(method);
        let path = with_leading_slash(path);

        let parsed = pattern::expand_pattern(&path)?
            .iter()
            .map(|expanded| ParsedPattern::parse(expanded))
            .collect::<RouterResult<Vec<_>>>()?;

        debug!(
            "Adding route {} {} ({} expansion(s))",
            method_label(&method),
            path,
            parsed.len()
        );

        for expanded in parsed {
            self.insert(&method, &path, expanded, data.clone());
        }
        Ok(())
    }

    fn insert(&mut self, method: &str, path: &str, parsed: ParsedPattern, data: T) {
        let static_path = parsed.static_path();
        let segment_count = parsed.segments.len();

        if let Some(position) = parsed
            .segments
            .iter()
            .position(|segment| matches!(segment, Segment::Wildcard { .. }))
        {
            if position + 1 < segment_count {
                warn!(
                    "Route '{}' has segments after a wildcard; they are unreachable and compiled matching will reject it",
                    path
                );
            }
        }

        let mut node = ROOT;
        let mut plan = Plan::default();

        for (i, segment) in parsed.segments.into_iter().enumerate() {
            match segment {
                Segment::Static(text) => node = self.static_child(node, text),
                Segment::Param(kind) => {
                    node = self.param_child(node);
                    let (key, optional) = match kind {
                        ParamSegment::Unnamed(name) => (ParamKey::Name(name), true),
                        ParamSegment::Named(name) => (ParamKey::Name(name), false),
                        ParamSegment::Pattern(re) => {
                            self.nodes[node].has_pattern_param = true;
                            plan.constraints.push((SegmentIndex::At(i), re.clone()));
                            (ParamKey::Pattern(re), false)
                        }
                    };
                    plan.slots.push(ParamSlot {
                        index: SegmentIndex::At(i),
                        key,
                        optional,
                    });
                }
                Segment::Wildcard {
                    name,
                    optional,
                    constraint,
                } => {
                    node = self.wildcard_child(node);
                    if let Some(re) = constraint {
                        plan.constraints.push((SegmentIndex::Rest(i), re));
                    }
                    plan.slots.push(ParamSlot {
                        index: SegmentIndex::Rest(i),
                        key: ParamKey::Name(name),
                        optional,
                    });
                }
            }
        }

        let has_params = plan.has_params();
        self.nodes[node]
            .methods
            .entry(method.to_string())
            .or_default()
            .push(Registration { data, plan });

        if !has_params {
            if let Some(static_path) = static_path {
                self.statics.insert(static_path, node);
            }
        }
    }

    /// Remove every registration of `method` for the path pattern.
    ///
    /// Segments are matched by kind, so `/users/:id` also removes a route
    /// registered as `/users/*`. Nodes left without registrations or
    /// children are pruned. Removing an unknown route is a no-op.
    pub fn remove_route(&mut self, method: &str, path: &str) -> RouterResult<()> {
        let method = normalize_method(method);
        let path = with_leading_slash(path);

        for expanded in pattern::expand_pattern(&path)? {
            let edges: Vec<Edge<'_>> = pattern::split_path(&expanded)
                .into_iter()
                .map(pattern::edge_kind)
                .collect();

            if self.remove_at(ROOT, &method, &edges) {
                debug!("Removed route {} {}", method_label(&method), expanded);
            }

            if let Some(static_path) = static_key(&edges) {
                let stale = self
                    .statics
                    .get(&static_path)
                    .is_some_and(|&id| self.nodes[id].methods.is_empty());
                if stale {
                    self.statics.remove(&static_path);
                }
            }
        }
        Ok(())
    }

    fn remove_at(&mut self, node: NodeId, method: &str, edges: &[Edge<'_>]) -> bool {
        let Some((edge, rest)) = edges.split_first() else {
            return self.nodes[node].methods.remove(method).is_some();
        };

        match edge {
            Edge::Static(key) => {
                let Some(&child) = self.nodes[node].statics.get(key.as_ref()) else {
                    return false;
                };
                let removed = self.remove_at(child, method, rest);
                if self.nodes[child].is_empty() {
                    self.nodes[node].statics.remove(key.as_ref());
                    self.release(child);
                }
                removed
            }
            Edge::Param => {
                let Some(child) = self.nodes[node].param else {
                    return false;
                };
                let removed = self.remove_at(child, method, rest);
                if self.nodes[child].is_empty() {
                    self.nodes[node].param = None;
                    self.release(child);
                }
                removed
            }
            Edge::CatchAll { .. } | Edge::Repeated { .. } => {
                let Some(child) = self.nodes[node].wildcard else {
                    return false;
                };
                let removed = self.remove_at(child, method, rest);
                if self.nodes[child].is_empty() {
                    self.nodes[node].wildcard = None;
                    self.release(child);
                }
                removed
            }
        }
    }

    /// Ids of every live node, parents before children
    pub(crate) fn live_nodes(&self) -> Vec<NodeId> {
        let mut ids = vec![ROOT];
        let mut next = 0;
        while next < ids.len() {
            let node = &self.nodes[ids[next]];
            ids.extend(node.statics.values().copied());
            ids.extend(node.param);
            ids.extend(node.wildcard);
            next += 1;
        }
        ids
    }
}

fn static_key(edges: &[Edge<'_>]) -> Option<String> {
    let mut path = String::new();
    for edge in edges {
        match edge {
            Edge::Static(text) => {
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

pub(crate) fn method_label(method: &str) -> &str {
    if method.is_empty() {
        "*"
    } else {
        method
    }
}
