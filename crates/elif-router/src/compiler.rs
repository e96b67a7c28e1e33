//! Route compilation for elif.rs
//!
//! Lowers a snapshot of the trie into a tree of closures. Each closure has
//! its depth, static children, method tables and fallbacks fixed when it is
//! built, so a lookup only runs the branches that exist for that route set.
//! Payloads are cloned into a dependency table and referenced by number.

use crate::error::{RouterError, RouterResult};
use crate::matcher::MatchedRoute;
use crate::pattern::{normalize_path, split_path};
use crate::tree::{normalize_method, NodeId, Plan, Router, ROOT};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Registration numbers of one node, grouped by method
#[derive(Debug, Default)]
struct MethodTable {
    exact: HashMap<String, Vec<usize>>,
    any: Vec<usize>,
}

impl MethodTable {
    fn candidates<'a>(&'a self, method: &str) -> impl Iterator<Item = usize> + 'a {
        let exact = if method.is_empty() {
            None
        } else {
            self.exact.get(method)
        };
        exact
            .into_iter()
            .flatten()
            .chain(self.any.iter())
            .copied()
    }

    fn select(&self, query: &Query<'_>, fallback: bool) -> Option<usize> {
        self.candidates(query.method)
            .find(|&i| query.plans[i].accepts(&query.segments, fallback))
    }

    fn collect(&self, query: &Query<'_>, fallback: bool, out: &mut Vec<usize>) {
        out.extend(
            self.candidates(query.method)
                .filter(|&i| query.plans[i].accepts(&query.segments, fallback)),
        );
    }
}

/// Per-lookup state shared by every closure of the tree
struct Query<'q> {
    method: &'q str,
    segments: Vec<&'q str>,
    plans: &'q [Plan],
}

type Matcher = Box<dyn Fn(&Query<'_>) -> Option<usize> + Send + Sync>;
type Collector = Box<dyn Fn(&Query<'_>, &mut Vec<usize>) + Send + Sync>;

/// Snapshot state shared while lowering one router
struct Lowering<'r, T> {
    router: &'r Router<T>,
    tables: HashMap<NodeId, Arc<MethodTable>>,
    deps: Vec<T>,
    plans: Vec<Plan>,
}

impl<'r, T: Clone> Lowering<'r, T> {
    fn new(router: &'r Router<T>) -> Self {
        Self {
            router,
            tables: HashMap::new(),
            deps: Vec::new(),
            plans: Vec::new(),
        }
    }

    /// Number the registrations of a node, once per node
    fn table(&mut self, id: NodeId) -> Arc<MethodTable> {
        if let Some(table) = self.tables.get(&id) {
            return Arc::clone(table);
        }

        let mut table = MethodTable::default();
        for (method, registrations) in &self.router.node(id).methods {
            let mut numbers = Vec::with_capacity(registrations.len());
            for registration in registrations {
                numbers.push(self.deps.len());
                self.deps.push(registration.data.clone());
                self.plans.push(registration.plan.clone());
            }
            if method.is_empty() {
                table.any = numbers;
            } else {
                table.exact.insert(method.clone(), numbers);
            }
        }

        let table = Arc::new(table);
        self.tables.insert(id, Arc::clone(&table));
        table
    }

    fn static_tables(&mut self) -> HashMap<String, Arc<MethodTable>> {
        let router = self.router;
        router
            .statics
            .iter()
            .map(|(path, &id)| (path.clone(), self.table(id)))
            .collect()
    }

    fn check_wildcard(&self, id: NodeId, path: &str) -> RouterResult<Option<NodeId>> {
        let Some(wildcard) = self.router.node(id).wildcard else {
            return Ok(None);
        };
        if self.router.node(wildcard).has_children() {
            return Err(RouterError::WildcardNotTerminal {
                path: format!("{path}/**"),
            });
        }
        Ok(Some(wildcard))
    }

    fn matcher(&mut self, id: NodeId, depth: usize, path: &str) -> RouterResult<Matcher> {
        let router = self.router;
        let node = router.node(id);

        let wildcard = self.check_wildcard(id, path)?.map(|w| self.table(w));
        let own = self.table(id);
        let param_tail = node.param.map(|p| self.table(p));
        let param = match node.param {
            Some(p) => Some(self.matcher(p, depth + 1, &format!("{path}/*"))?),
            None => None,
        };
        let mut statics = HashMap::with_capacity(node.statics.len());
        for (key, &child) in &node.statics {
            statics.insert(key.clone(), self.matcher(child, depth + 1, &format!("{path}/{key}"))?);
        }

        Ok(Box::new(move |query: &Query<'_>| {
            if query.segments.len() == depth {
                return own
                    .select(query, false)
                    .or_else(|| param_tail.as_ref().and_then(|t| t.select(query, true)))
                    .or_else(|| wildcard.as_ref().and_then(|t| t.select(query, true)));
            }
            if let Some(found) = statics
                .get(query.segments[depth])
                .and_then(|next| next(query))
            {
                return Some(found);
            }
            if let Some(found) = param.as_ref().and_then(|next| next(query)) {
                return Some(found);
            }
            wildcard.as_ref().and_then(|t| t.select(query, false))
        }))
    }

    fn collector(&mut self, id: NodeId, depth: usize, path: &str) -> RouterResult<Collector> {
        let router = self.router;
        let node = router.node(id);

        let wildcard = self.check_wildcard(id, path)?.map(|w| self.table(w));
        let own = self.table(id);
        let param_tail = node.param.map(|p| self.table(p));
        let param = match node.param {
            Some(p) => Some(self.collector(p, depth + 1, &format!("{path}/*"))?),
            None => None,
        };
        let mut statics = HashMap::with_capacity(node.statics.len());
        for (key, &child) in &node.statics {
            statics.insert(key.clone(), self.collector(child, depth + 1, &format!("{path}/{key}"))?);
        }

        Ok(Box::new(move |query: &Query<'_>, out: &mut Vec<usize>| {
            let exhausted = query.segments.len() == depth;
            if let Some(table) = &wildcard {
                table.collect(query, exhausted, out);
            }
            if exhausted {
                if let Some(table) = &param_tail {
                    table.collect(query, true, out);
                }
                own.collect(query, false, out);
            } else {
                if let Some(next) = &param {
                    next(query, out);
                }
                if let Some(next) = statics.get(query.segments[depth]) {
                    next(query, out);
                }
            }
        }))
    }
}

/// A router snapshot compiled for single-result lookups
pub struct CompiledRouter<T> {
    deps: Vec<T>,
    plans: Vec<Plan>,
    statics: HashMap<String, Arc<MethodTable>>,
    root: Matcher,
}

impl<T> CompiledRouter<T> {
    /// Find the best route, with the same result as [`Router::find_route`]
    /// had at compile time
    pub fn find(&self, method: &str, path: &str) -> Option<MatchedRoute<'_, T>> {
        let method = normalize_method(method);
        let path = normalize_path(path);

        if let Some(table) = self.statics.get(path) {
            if let Some(i) = table.candidates(&method).next() {
                return Some(MatchedRoute {
                    data: &self.deps[i],
                    params: None,
                });
            }
        }

        let query = Query {
            method: &method,
            segments: split_path(path),
            plans: &self.plans,
        };
        let i = (self.root)(&query)?;
        Some(matched(&self.deps, &self.plans, i, &query.segments))
    }

    /// Number of registrations in the snapshot
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

impl<T> fmt::Debug for CompiledRouter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRouter")
            .field("registrations", &self.deps.len())
            .field("static_paths", &self.statics.len())
            .finish()
    }
}

/// A router snapshot compiled for match-all lookups
pub struct CompiledMatchAll<T> {
    deps: Vec<T>,
    plans: Vec<Plan>,
    root: Collector,
}

impl<T> CompiledMatchAll<T> {
    /// Find every matching route, in the order of [`Router::find_all_routes`]
    pub fn find_all(&self, method: &str, path: &str) -> Vec<MatchedRoute<'_, T>> {
        let method = normalize_method(method);
        let query = Query {
            method: &method,
            segments: split_path(normalize_path(path)),
            plans: &self.plans,
        };

        let mut found = Vec::new();
        (self.root)(&query, &mut found);
        found
            .into_iter()
            .map(|i| matched(&self.deps, &self.plans, i, &query.segments))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

impl<T> fmt::Debug for CompiledMatchAll<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMatchAll")
            .field("registrations", &self.deps.len())
            .finish()
    }
}

fn matched<'a, T>(deps: &'a [T], plans: &[Plan], i: usize, segments: &[&str]) -> MatchedRoute<'a, T> {
    let plan = &plans[i];
    MatchedRoute {
        data: &deps[i],
        params: plan.has_params().then(|| plan.extract(segments)),
    }
}

impl<T: Clone> Router<T> {
    /// Compile a snapshot of the router for single-result lookups.
    ///
    /// Fails with [`RouterError::WildcardNotTerminal`] when a wildcard has
    /// children. Later changes to the router are not reflected.
    pub fn compile(&self) -> RouterResult<CompiledRouter<T>> {
        let mut lowering = Lowering::new(self);
        let statics = lowering.static_tables();
        let root = lowering.matcher(ROOT, 0, "")?;

        debug!(
            "Compiled router with {} registration(s) and {} static path(s)",
            lowering.deps.len(),
            statics.len()
        );

        Ok(CompiledRouter {
            deps: lowering.deps,
            plans: lowering.plans,
            statics,
            root,
        })
    }

    /// Compile a snapshot of the router for match-all lookups
    pub fn compile_all(&self) -> RouterResult<CompiledMatchAll<T>> {
        let mut lowering = Lowering::new(self);
        let root = lowering.collector(ROOT, 0, "")?;

        debug!(
            "Compiled match-all router with {} registration(s)",
            lowering.deps.len()
        );

        Ok(CompiledMatchAll {
            deps: lowering.deps,
            plans: lowering.plans,
            root,
        })
    }
}
