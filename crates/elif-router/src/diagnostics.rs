//! Router diagnostics: trie rendering and size counters

use crate::tree::{method_label, NodeId, Router, ROOT};
use serde::Serialize;
use std::fmt::{self, Display};

/// Size counters of a router
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouterStats {
    /// Live trie nodes, including the root
    pub nodes: usize,
    /// Paths answered by the static index
    pub static_paths: usize,
    /// Registrations across all nodes and methods
    pub registrations: usize,
}

impl<T> Router<T> {
    pub fn stats(&self) -> RouterStats {
        let live = self.live_nodes();
        let registrations = live
            .iter()
            .map(|&id| self.node(id).methods.values().map(Vec::len).sum::<usize>())
            .sum();

        RouterStats {
            nodes: live.len(),
            static_paths: self.statics.len(),
            registrations,
        }
    }

    /// Render the trie, one node per line.
    ///
    /// ```text
    /// <root>
    ///     ├── /users ┈> [GET] list
    ///     │       ├── /* ┈> [GET] show, [DELETE] destroy
    /// ```
    ///
    /// Static children are listed by key, followed by the parametric child
    /// (`/*`, or `/(*)` when it carries inline patterns) and the wildcard
    /// child (`/**`). `[*]` marks any-method registrations.
    pub fn format_tree(&self) -> String
    where
        T: Display,
    {
        let mut out = String::from("<root>");
        self.format_methods(ROOT, &mut out);
        self.format_children(ROOT, "    ", &mut out);
        out
    }

    fn format_children(&self, id: NodeId, prefix: &str, out: &mut String)
    where
        T: Display,
    {
        let node = self.node(id);
        let children = node
            .statics
            .values()
            .copied()
            .chain(node.param)
            .chain(node.wildcard);

        for child in children {
            let key = &self.node(child).key;
            let label = if self.node(child).has_pattern_param {
                "(*)"
            } else {
                key.as_str()
            };
            out.push_str(&format!("\n{prefix}├── /{label}"));
            self.format_methods(child, out);
            self.format_children(child, &format!("{prefix}│       "), out);
        }
    }

    fn format_methods(&self, id: NodeId, out: &mut String)
    where
        T: Display,
    {
        let entries: Vec<String> = self
            .node(id)
            .methods
            .iter()
            .flat_map(|(method, registrations)| {
                registrations
                    .iter()
                    .map(move |registration| format!("[{}] {}", method_label(method), registration.data))
            })
            .collect();

        if !entries.is_empty() {
            out.push_str(" ┈> ");
            out.push_str(&entries.join(", "));
        }
    }
}

impl fmt::Display for RouterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} node(s), {} static path(s), {} registration(s)",
            self.nodes, self.static_paths, self.registrations
        )
    }
}
