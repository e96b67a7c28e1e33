//! # elif-router
//!
//! Trie-based route matching for the elif.rs framework.
//!
//! ## Features
//!
//! - **Path patterns**: static segments, `:name` parameters, unnamed `*`,
//!   catch-all `**` / `**:name`, inline regex segments (`:id(\d+)`),
//!   repeated parameters (`:path+`, `:path*`), optional parameters (`:id?`)
//!   and `{...}` groups
//! - **Method-aware**: registrations per HTTP method, `""` matches any method
//! - **Compiled lookups**: lower a snapshot into a closure tree, or render it
//!   as standalone Rust source
//! - **Regex oracle**: translate a single pattern into one regular expression
//!
//! ## Quick Start
//!
//! ```rust
//! use elif_router::{create_router, add_route, find_route, find_all_routes, FindOptions};
//!
//! let mut router = create_router();
//! add_route(&mut router, "GET", "/users/:id", "show_user").unwrap();
//! add_route(&mut router, "GET", "/users/**", "user_fallback").unwrap();
//!
//! let matched = find_route(&router, "GET", "/users/42", &FindOptions::default()).unwrap();
//! assert_eq!(*matched.data, "show_user");
//! assert_eq!(matched.params.unwrap().get_int("id").unwrap(), 42);
//!
//! let all: Vec<_> = find_all_routes(&router, "GET", "/users/42")
//!     .into_iter()
//!     .map(|m| *m.data)
//!     .collect();
//! assert_eq!(all, vec!["user_fallback", "show_user"]);
//! ```

mod codegen;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod params;
mod pattern;
pub mod regexp;
pub mod tree;

pub use compiler::{CompiledMatchAll, CompiledRouter};
pub use config::{CompileOptions, CompileOptionsBuilder, FindOptions};
pub use diagnostics::RouterStats;
pub use error::{RouterError, RouterResult};
pub use matcher::MatchedRoute;
pub use params::{ParamError, Params};
pub use regexp::{route_to_regexp, RouteRegex};
pub use tree::Router;

use serde::Serialize;

/// Create an empty router
pub fn create_router<T>() -> Router<T> {
    Router::new()
}

/// Register `data` for `method` (`""` for any method) and a path pattern
pub fn add_route<T: Clone>(router: &mut Router<T>, method: &str, path: &str, data: T) -> RouterResult<()> {
    router.add_route(method, path, data)
}

/// Remove the registrations of `method` for a path pattern
pub fn remove_route<T>(router: &mut Router<T>, method: &str, path: &str) -> RouterResult<()> {
    router.remove_route(method, path)
}

/// Find the best matching route
pub fn find_route<'a, T>(
    router: &'a Router<T>,
    method: &str,
    path: &str,
    options: &FindOptions,
) -> Option<MatchedRoute<'a, T>> {
    router.find_route(method, path, options)
}

/// Find every matching route, least specific first
pub fn find_all_routes<'a, T>(router: &'a Router<T>, method: &str, path: &str) -> Vec<MatchedRoute<'a, T>> {
    router.find_all_routes(method, path)
}

/// Compile a snapshot of the router for single-result lookups
pub fn compile_router<T: Clone>(router: &Router<T>) -> RouterResult<CompiledRouter<T>> {
    router.compile()
}

/// Compile a snapshot of the router for match-all lookups
pub fn compile_router_all<T: Clone>(router: &Router<T>) -> RouterResult<CompiledMatchAll<T>> {
    router.compile_all()
}

/// Render the router as Rust source with JSON string payloads
pub fn compile_router_to_string<T: Serialize>(router: &Router<T>, options: &CompileOptions) -> RouterResult<String> {
    router.to_source(options)
}

/// Render the router as Rust source, payloads rendered by `render`
pub fn compile_router_to_string_with<T, F>(router: &Router<T>, options: &CompileOptions, render: F) -> RouterResult<String>
where
    F: FnMut(&T) -> RouterResult<String>,
{
    router.to_source_with(options, render)
}
