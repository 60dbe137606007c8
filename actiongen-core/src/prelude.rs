//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use actiongen_core::prelude::*;
//! ```

pub use crate::builder::Actiongen;
pub use crate::config::{load_config, ActiongenConfig};
pub use crate::error::{ActiongenError, ActiongenResult};
pub use crate::report::{to_json, write_document, ActionDocument};
pub use crate::resolve::{resolve_all, resolve_many, ResolutionResult, Resolver};
pub use crate::source::{locate, DeclarationStyle, SourceIndex};
pub use crate::variants::{parse_variants, EnumDescriptor, VariantDescriptor};

#[cfg(feature = "dot")]
pub use crate::graph::generate_dot;
