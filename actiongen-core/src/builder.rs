//! Builder pattern API for actiongen extraction.
//!
//! ```rust,ignore
//! use actiongen_core::prelude::*;
//!
//! let results = Actiongen::new("src/action.rs")
//!     .root("Action")
//!     .public_only(true)
//!     .run()?;
//!
//! for result in &results {
//!     println!("{} has {} actions", result.root, result.actions.len());
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::DEFAULT_ROOT;
use crate::error::{ActiongenError, ActiongenResult, IoResultExt};
use crate::resolve::{resolve_many, ResolutionResult};
use crate::source::{DeclarationStyle, SourceIndex};

/// Builder for configuring an extraction run.
#[derive(Debug, Clone)]
pub struct Actiongen {
    /// Source file to read
    input: PathBuf,

    /// Root enums; empty means [`DEFAULT_ROOT`]
    roots: Vec<String>,

    /// Which declarations count as enums
    style: DeclarationStyle,
}

impl Actiongen {
    /// Create a builder reading `input`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            roots: Vec::new(),
            style: DeclarationStyle::Any,
        }
    }

    /// Add a root enum. Duplicates are ignored.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.roots.contains(&name) {
            self.roots.push(name);
        }
        self
    }

    /// Add several root enums.
    pub fn roots<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(self, |builder, name| builder.root(name))
    }

    /// Choose which declarations count as enums.
    pub fn declaration_style(mut self, style: DeclarationStyle) -> Self {
        self.style = style;
        self
    }

    /// Shorthand for [`DeclarationStyle::Public`] when `enabled`.
    pub fn public_only(self, enabled: bool) -> Self {
        let style = if enabled {
            DeclarationStyle::Public
        } else {
            DeclarationStyle::Any
        };
        self.declaration_style(style)
    }

    /// The configured input path.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Roots this run will resolve.
    pub fn root_names(&self) -> Vec<&str> {
        if self.roots.is_empty() {
            vec![DEFAULT_ROOT]
        } else {
            self.roots.iter().map(String::as_str).collect()
        }
    }

    /// Read the input file and resolve every root.
    ///
    /// Fails on the first root that cannot be found.
    pub fn run(&self) -> ActiongenResult<Vec<ResolutionResult>> {
        let source = fs::read_to_string(&self.input).with_path(&self.input)?;
        self.run_on_source(&source)
    }

    /// Resolve every root against already loaded `source`.
    pub fn run_on_source(&self, source: &str) -> ActiongenResult<Vec<ResolutionResult>> {
        let roots = self.root_names();
        if let Some(bad) = roots.iter().find(|r| !is_identifier(r)) {
            return Err(ActiongenError::invalid_argument(format!(
                "root `{}` is not an identifier",
                bad
            )));
        }

        let index = SourceIndex::new(source, self.style);
        debug!(
            input = %self.input.display(),
            enums = index.declared_count(),
            style = ?self.style,
            "source indexed"
        );

        resolve_many(&index, &roots).into_iter().collect()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
