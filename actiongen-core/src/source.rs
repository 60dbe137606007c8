//! Enum definition locator.
//!
//! Finds the raw body of `enum Name { ... }` declarations with shallow
//! lexical matching, not a Rust parser:
//! - The body ends at the first `}` after the opening brace. Enum bodies
//!   with nested braces (struct-like variants) are cut short there.
//! - A body whose brace is never closed runs to the end of the text.
//! - Generic declarations (`enum Name<T> { ... }`) are not matched.
//! - Only the first declaration of a name counts.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Which declarations count as enum definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeclarationStyle {
    /// Any visibility: `enum X {`, `pub enum X {`, `pub(crate) enum X {`
    #[default]
    Any,
    /// Only `pub enum X {`
    Public,
}

impl DeclarationStyle {
    fn accepts(self, visibility: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Public => visibility.map(str::trim) == Some("pub"),
        }
    }
}

/// Pre-compiled declaration pattern.
///
/// Groups: 1 = visibility, 2 = name, 3 = body.
fn declaration_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| {
        Regex::new(
            r"\b(pub(?:\s*\([^)]*\))?\s+)?enum\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{([^}]*)(?:\}|\z)",
        )
        .expect("Hardcoded regex pattern is valid")
    })
}

/// Index of enum definitions in one immutable source text.
///
/// Built with a single scan; lookups afterwards are O(1). Names and bodies
/// borrow from the source.
#[derive(Debug, Clone)]
pub struct SourceIndex<'a> {
    source: &'a str,
    style: DeclarationStyle,
    bodies: HashMap<&'a str, &'a str>,
}

impl<'a> SourceIndex<'a> {
    /// Scan `source` for enum declarations accepted by `style`.
    pub fn new(source: &'a str, style: DeclarationStyle) -> Self {
        let mut bodies = HashMap::new();

        for caps in declaration_regex().captures_iter(source) {
            let visibility = caps.get(1).map(|m| m.as_str());
            if !style.accepts(visibility) {
                continue;
            }
            let (Some(name), Some(body)) = (caps.get(2), caps.get(3)) else {
                continue;
            };
            bodies.entry(name.as_str()).or_insert(body.as_str());
        }

        Self {
            source,
            style,
            bodies,
        }
    }

    /// Raw inner text of the first definition of `type_name`, if any.
    pub fn locate(&self, type_name: &str) -> Option<&'a str> {
        self.bodies.get(type_name).copied()
    }

    /// Whether `type_name` has a definition.
    pub fn contains(&self, type_name: &str) -> bool {
        self.bodies.contains_key(type_name)
    }

    /// Number of distinct enum names found.
    pub fn declared_count(&self) -> usize {
        self.bodies.len()
    }

    /// The indexed source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The declaration style this index was built with.
    pub fn style(&self) -> DeclarationStyle {
        self.style
    }
}

/// Locate the raw body of `enum type_name { ... }` in `source`.
///
/// Absence is a normal outcome (structs, primitives, foreign types).
pub fn locate<'a>(source: &'a str, type_name: &str) -> Option<&'a str> {
    SourceIndex::new(source, DeclarationStyle::Any).locate(type_name)
}
