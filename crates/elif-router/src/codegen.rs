//! Rust source generation for route tables
//!
//! Renders a router snapshot as one standalone Rust function that walks the
//! path with nested `if`/`match` blocks. The generated function takes the
//! method and path and returns the payload with its parameters as
//! `(name, value)` pairs. Inline constraints become lazily compiled
//! `regex::Regex` values, so the generated code needs the `regex` crate.

use crate::config::CompileOptions;
use crate::error::{RouterError, RouterResult};
use crate::tree::{NodeId, ParamKey, Registration, Router, SegmentIndex, ROOT};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex is valid"));

const PARAMS_TYPE: &str = "Vec<(&'static str, String)>";

/// Indented line writer
#[derive(Default)]
struct Source {
    out: String,
    indent: usize,
}

impl Source {
    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    fn close(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    fn reopen(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.open(text);
    }
}

/// Quote `text` as a raw string literal
fn raw_literal(text: &str) -> String {
    let mut hashes = String::new();
    while text.contains(&format!("\"{hashes}")) {
        hashes.push('#');
    }
    format!("r{hashes}\"{text}\"{hashes}")
}

struct Generator<'r, T, F> {
    router: &'r Router<T>,
    render: F,
    match_all: bool,
    regexes: Vec<String>,
    regex_ids: HashMap<String, usize>,
    src: Source,
}

impl<'r, T, F> Generator<'r, T, F>
where
    F: FnMut(&T) -> RouterResult<String>,
{
    fn regex_id(&mut self, re: &Regex) -> usize {
        if let Some(&id) = self.regex_ids.get(re.as_str()) {
            return id;
        }
        let id = self.regexes.len();
        self.regexes.push(re.as_str().to_string());
        self.regex_ids.insert(re.as_str().to_string(), id);
        id
    }

    fn wildcard_of(&self, id: NodeId, path: &str) -> RouterResult<Option<NodeId>> {
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

    fn emit_result(&mut self, data: &str, params: &str) {
        if self.match_all {
            self.src.line(&format!("out.push(({data}, {params}));"));
        } else {
            self.src.line(&format!("return Some(({data}, {params}));"));
        }
    }

    fn registration(&mut self, method: &str, registration: &Registration<T>, fallback: bool) -> RouterResult<()> {
        let plan = &registration.plan;
        if fallback && !plan.slots.last().is_some_and(|slot| slot.optional) {
            return Ok(());
        }

        let mut conditions = Vec::new();
        if !method.is_empty() {
            conditions.push(format!("m == {method:?}"));
        }
        for (index, re) in &plan.constraints {
            let id = self.regex_id(re);
            conditions.push(match index {
                SegmentIndex::At(i) => format!("s.get({i}).is_some_and(|x| R[{id}].is_match(x))"),
                SegmentIndex::Rest(i) => format!("R[{id}].is_match(&s[{i}.min(l)..].join(\"/\"))"),
            });
        }

        let data = (self.render)(&registration.data)?;
        if conditions.is_empty() {
            self.src.open("{");
        } else {
            self.src.open(&format!("if {} {{", conditions.join(" && ")));
        }

        if plan.slots.is_empty() {
            self.emit_result(&data, "Vec::new()");
        } else {
            self.src.line(&format!("let mut v: {PARAMS_TYPE} = Vec::new();"));
            for slot in &plan.slots {
                match (&slot.key, slot.index) {
                    (ParamKey::Name(name), SegmentIndex::At(i)) => {
                        self.src.line(&format!(
                            "if let Some(x) = s.get({i}) {{ v.push(({name:?}, x.to_string())); }}"
                        ));
                    }
                    (ParamKey::Name(name), SegmentIndex::Rest(i)) => {
                        self.src
                            .line(&format!("v.push(({name:?}, s[{i}.min(l)..].join(\"/\")));"));
                    }
                    (ParamKey::Pattern(re), index) => {
                        let id = self.regex_id(re);
                        let value = match index {
                            SegmentIndex::At(i) => format!("s.get({i}).map(|x| x.to_string())"),
                            SegmentIndex::Rest(i) => format!("Some(s[{i}.min(l)..].join(\"/\"))"),
                        };
                        self.src.open(&format!("if let Some(x) = {value} {{"));
                        self.src.open(&format!("if let Some(c) = R[{id}].captures(&x) {{"));
                        self.src.line(&format!(
                            "for n in R[{id}].capture_names().flatten() {{ if let Some(g) = c.name(n) {{ v.push((n, g.as_str().to_string())); }} }}"
                        ));
                        self.src.close("}");
                        self.src.close("}");
                    }
                }
            }
            self.emit_result(&data, "v");
        }

        self.src.close("}");
        Ok(())
    }

    /// Exact-method registrations first, any-method ones last
    fn methods(&mut self, id: NodeId, fallback: bool) -> RouterResult<()> {
        let router = self.router;
        let methods = &router.node(id).methods;
        for (method, registrations) in methods.iter().filter(|(m, _)| !m.is_empty()) {
            for registration in registrations {
                self.registration(method, registration, fallback)?;
            }
        }
        if let Some(registrations) = methods.get("") {
            for registration in registrations {
                self.registration("", registration, fallback)?;
            }
        }
        Ok(())
    }

    fn static_shortcuts(&mut self) -> RouterResult<()> {
        let router = self.router;
        let mut paths: Vec<(&String, &NodeId)> = router.statics.iter().collect();
        paths.sort();
        if paths.is_empty() {
            return Ok(());
        }

        self.src.open("match p {");
        for (path, &id) in paths {
            let methods = &router.node(id).methods;
            if methods.is_empty() {
                continue;
            }
            self.src.open(&format!("{path:?} => {{"));
            for (method, registrations) in methods.iter().filter(|(m, _)| !m.is_empty()) {
                if let Some(first) = registrations.first() {
                    let data = (self.render)(&first.data)?;
                    self.src.line(&format!(
                        "if m == {method:?} {{ return Some(({data}, Vec::new())); }}"
                    ));
                }
            }
            if let Some(first) = methods.get("").and_then(|r| r.first()) {
                let data = (self.render)(&first.data)?;
                self.src.line(&format!("return Some(({data}, Vec::new()));"));
            }
            self.src.close("}");
        }
        self.src.line("_ => {}");
        self.src.close("}");
        Ok(())
    }

    fn node(&mut self, id: NodeId, depth: usize, path: &str) -> RouterResult<()> {
        let router = self.router;
        let node = router.node(id);
        let wildcard = self.wildcard_of(id, path)?;

        self.src.open(&format!("if l == {depth} {{"));
        self.methods(id, false)?;
        if let Some(param) = node.param {
            self.methods(param, true)?;
        }
        if let Some(wildcard) = wildcard {
            self.methods(wildcard, true)?;
        }
        self.src.reopen("} else {");
        self.children(id, depth, path)?;
        if let Some(param) = node.param {
            self.node(param, depth + 1, &format!("{path}/*"))?;
        }
        if let Some(wildcard) = wildcard {
            self.methods(wildcard, false)?;
        }
        self.src.close("}");
        Ok(())
    }

    fn node_all(&mut self, id: NodeId, depth: usize, path: &str) -> RouterResult<()> {
        let router = self.router;
        let node = router.node(id);

        if let Some(wildcard) = self.wildcard_of(id, path)? {
            self.src.open(&format!("if l == {depth} {{"));
            self.methods(wildcard, true)?;
            self.src.reopen("} else {");
            self.methods(wildcard, false)?;
            self.src.close("}");
        }
        if let Some(param) = node.param {
            self.src.open(&format!("if l == {depth} {{"));
            self.methods(param, true)?;
            self.src.reopen("} else {");
            self.node_all(param, depth + 1, &format!("{path}/*"))?;
            self.src.close("}");
        }
        if !node.statics.is_empty() {
            self.src.open(&format!("if l > {depth} {{"));
            self.children(id, depth, path)?;
            self.src.close("}");
        }
        self.src.open(&format!("if l == {depth} {{"));
        self.methods(id, false)?;
        self.src.close("}");
        Ok(())
    }

    fn children(&mut self, id: NodeId, depth: usize, path: &str) -> RouterResult<()> {
        let router = self.router;
        let statics = &router.node(id).statics;
        if statics.is_empty() {
            return Ok(());
        }

        self.src.open(&format!("match s[{depth}] {{"));
        for (key, &child) in statics {
            self.src.open(&format!("{key:?} => {{"));
            let child_path = format!("{path}/{key}");
            if self.match_all {
                self.node_all(child, depth + 1, &child_path)?;
            } else {
                self.node(child, depth + 1, &child_path)?;
            }
            self.src.close("}");
        }
        self.src.line("_ => {}");
        self.src.close("}");
        Ok(())
    }
}

impl<T> Router<T> {
    /// Render the router as Rust source, turning each payload into a Rust
    /// expression of the configured `data_type` with `render`.
    pub fn to_source_with<F>(&self, options: &CompileOptions, render: F) -> RouterResult<String>
    where
        F: FnMut(&T) -> RouterResult<String>,
    {
        let name = options.get_function_name().as_str();
        let match_all = *options.get_match_all();
        let data_type = options.get_data_type();
        if name == "_" || !IDENTIFIER.is_match(name) {
            return Err(RouterError::InvalidFunctionName(name.to_string()));
        }

        let mut generator = Generator {
            router: self,
            render,
            match_all,
            regexes: Vec::new(),
            regex_ids: HashMap::new(),
            src: Source {
                out: String::new(),
                indent: 1,
            },
        };

        if match_all {
            generator.src.line(&format!("let mut out: Vec<({}, {PARAMS_TYPE})> = Vec::new();", data_type));
        } else {
            generator.static_shortcuts()?;
        }
        generator
            .src
            .line("let s: Vec<&str> = p.split('/').filter(|x| !x.is_empty()).collect();");
        generator.src.line("let l = s.len();");
        if match_all {
            generator.node_all(ROOT, 0, "")?;
            generator.src.line("out");
        } else {
            generator.node(ROOT, 0, "")?;
            generator.src.line("None");
        }

        let returns = if match_all {
            format!("Vec<({}, {PARAMS_TYPE})>", data_type)
        } else {
            format!("Option<({}, {PARAMS_TYPE})>", data_type)
        };

        let mut src = Source::default();
        src.line("#[allow(unused_variables, unused_mut, unreachable_code, clippy::all)]");
        src.open(&format!("pub fn {name}(m: &str, p: &str) -> {returns} {{"));
        if !generator.regexes.is_empty() {
            src.open("static R: std::sync::LazyLock<Vec<regex::Regex>> = std::sync::LazyLock::new(|| {");
            src.open("[");
            for re in &generator.regexes {
                src.line(&format!("{},", raw_literal(re)));
            }
            src.close("]");
            src.line(".iter()");
            src.line(".map(|re| regex::Regex::new(re).unwrap())");
            src.line(".collect()");
            src.close("});");
        }
        src.line("let m = m.to_ascii_uppercase();");
        src.line("let m = m.as_str();");
        src.line("let p = match p.strip_suffix('/') { Some(t) if !t.is_empty() => t, _ => p };");
        src.out.push_str(&generator.src.out);
        src.close("}");

        debug!(
            "Generated {} source for '{}' ({} constraint regex(es))",
            if match_all { "match-all" } else { "single-match" },
            name,
            generator.regexes.len()
        );

        Ok(src.out)
    }

    /// Render the router as Rust source with every payload emitted as a JSON
    /// string literal
    pub fn to_source(&self, options: &CompileOptions) -> RouterResult<String>
    where
        T: Serialize,
    {
        self.to_source_with(options, |data| Ok(format!("{:?}", serde_json::to_string(data)?)))
    }
}
