//! Lookup and compilation options

use serde::{Deserialize, Serialize};
use service_builder::builder;

/// Options for a single interpreted lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    /// Skip parameter extraction, matched routes carry `params: None`
    pub ignore_params: bool,
}

impl FindOptions {
    /// Options that skip parameter extraction
    pub fn without_params() -> Self {
        Self { ignore_params: true }
    }
}

/// Configuration for rendering a router as Rust source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[builder]
pub struct CompileOptions {
    /// Generate a matcher returning every matching route instead of the first
    #[builder(default = "false", getter)]
    pub match_all: bool,

    /// Name of the generated function, must be a Rust identifier
    #[builder(default = "\"find_route\".to_string()", getter)]
    pub function_name: String,

    /// Rust type of the payload expressions in the generated source
    #[builder(default = "\"&'static str\".to_string()", getter)]
    pub data_type: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            match_all: false,
            function_name: "find_route".to_string(),
            data_type: "&'static str".to_string(),
        }
    }
}

impl CompileOptionsBuilder {
    /// Options for a match-all function named `find_all_routes`
    pub fn match_all_routes() -> Self {
        CompileOptionsBuilder::new()
            .match_all(true)
            .function_name("find_all_routes".to_string())
    }

    /// Options for payloads rendered by a hook as expressions of `data_type`
    pub fn typed(function_name: &str, data_type: &str) -> Self {
        CompileOptionsBuilder::new()
            .function_name(function_name.to_string())
            .data_type(data_type.to_string())
    }
}
