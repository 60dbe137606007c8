//! actiongen-core: enum hierarchy extraction for Rust action generators.
//!
//! Given Rust source text and a root enum name, this library finds the
//! root's variants, follows every variant payload that names another enum
//! in the same text, and returns the whole hierarchy as data:
//!
//! ```json
//! { "Actions": [ { "name": "Open", "type": "Target" } ],
//!   "Dependencies": { "Target": [ { "name": "File" } ] } }
//! ```
//!
//! Matching is lexical (regular expressions and a small scanner), not a
//! Rust parser. See [`source`] for the known limits.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use actiongen_core::prelude::*;
//!
//! let result = resolve_all(&source, "Action")?;
//! let json = to_json(&ActionDocument::from(result), 2)?;
//! ```
//!
//! # Module Organization
//!
//! - [`source`]: Enum definition locator
//! - [`variants`]: Variant list parsing and payload type candidates
//! - [`resolve`]: Transitive dependency resolution
//! - [`report`]: Output document and JSON formatting
//! - [`graph`]: Dependency graph and Graphviz DOT export (`dot` feature)
//! - [`builder`]: Fluent builder over a source file
//! - [`config`]: actiongen.toml loading
//! - [`logging`]: tracing subscriber setup
//! - [`prelude`]: Commonly used re-exports
//! - [`error`]: Typed error handling
//!
//! # Cargo Features
//!
//! - `dot` (default): Graphviz export of the dependency graph
//! - `parallel` (default): Resolve several roots on the rayon pool

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod resolve;
pub mod source;
pub mod variants;

#[cfg(feature = "dot")]
pub mod graph;

// Error types
pub use error::{ActiongenError, ActiongenResult, IoResultExt};

// Builder API
pub use builder::Actiongen;

// Configuration
pub use config::{
    check_indent, load_config, load_config_file, ActiongenConfig, CONFIG_FILE_NAME,
    DEFAULT_INDENT, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_ROOT, MAX_INDENT,
};

// Logging
pub use logging::init_logging;

// Locator
pub use source::{locate, DeclarationStyle, SourceIndex};

// Variant parsing
pub use variants::{
    parse_variants, payload_type_candidates, strip_comments, EnumDescriptor, VariantDescriptor,
};

// Resolution
pub use resolve::{resolve_all, resolve_many, ResolutionResult, Resolver};

// Reporting
pub use report::{print_summary, summary_line, to_json, write_document, ActionDocument};

#[cfg(feature = "dot")]
pub use graph::{build_graph, generate_dot};
