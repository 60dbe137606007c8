//! Transitive enum dependency resolution.
//!
//! Starting at a root enum, every variant payload is scanned for
//! capitalized type names. Names that the [`SourceIndex`] knows as enums
//! become dependencies and are resolved the same way, until the work-set
//! is empty.
//!
//! Traversal state lives in an explicit [`TraversalContext`]:
//! - `scheduled` holds every name that is resolved, pending, or the root.
//!   A scheduled name is never queued again, which makes self-cycles,
//!   mutual cycles and diamond graphs terminate with one resolution each.
//! - `pending` is a FIFO queue, so dependency order is discovery order and
//!   identical across runs.
//!
//! Work is bounded by O(distinct enums × body length).

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{ActiongenError, ActiongenResult};
use crate::source::{DeclarationStyle, SourceIndex};
use crate::variants::{parse_variants, payload_type_candidates, EnumDescriptor, VariantDescriptor};

/// Output of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Name of the root enum
    pub root: String,
    /// Variants of the root enum
    pub actions: EnumDescriptor,
    /// Every other reachable enum, in discovery order. Never contains the root.
    pub dependencies: IndexMap<String, EnumDescriptor>,
}

impl ResolutionResult {
    /// Variants of `name`, whether it is the root or a dependency.
    pub fn get(&self, name: &str) -> Option<&EnumDescriptor> {
        if name == self.root {
            Some(&self.actions)
        } else {
            self.dependencies.get(name)
        }
    }

    /// Dependency names in discovery order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Root plus dependencies.
    pub fn type_count(&self) -> usize {
        1 + self.dependencies.len()
    }

    /// Every `(enum, variant)` pair, root first.
    pub fn variants(&self) -> impl Iterator<Item = (&str, &VariantDescriptor)> {
        let root = self.actions.iter().map(move |v| (self.root.as_str(), v));
        let deps = self
            .dependencies
            .iter()
            .flat_map(|(name, variants)| variants.iter().map(move |v| (name.as_str(), v)));
        root.chain(deps)
    }
}

/// Mutable state of one traversal.
#[derive(Debug)]
struct TraversalContext {
    root: String,
    resolved: IndexMap<String, EnumDescriptor>,
    pending: VecDeque<String>,
    scheduled: HashSet<String>,
}

impl TraversalContext {
    fn new(root: &str) -> Self {
        let mut scheduled = HashSet::new();
        scheduled.insert(root.to_string());
        Self {
            root: root.to_string(),
            resolved: IndexMap::new(),
            pending: VecDeque::new(),
            scheduled,
        }
    }

    /// Queue `name` unless it was already seen. Returns whether it was queued.
    fn schedule(&mut self, name: &str) -> bool {
        if self.scheduled.contains(name) {
            return false;
        }
        self.scheduled.insert(name.to_string());
        self.pending.push_back(name.to_string());
        true
    }

    fn next_pending(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    fn finish(self, actions: EnumDescriptor) -> ResolutionResult {
        ResolutionResult {
            root: self.root,
            actions,
            dependencies: self.resolved,
        }
    }
}

/// Resolves roots against a shared, immutable [`SourceIndex`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'i, 'a> {
    index: &'i SourceIndex<'a>,
}

impl<'i, 'a> Resolver<'i, 'a> {
    /// Create a resolver over `index`.
    pub fn new(index: &'i SourceIndex<'a>) -> Self {
        Self { index }
    }

    /// Resolve `root` and all enums reachable from its payloads.
    ///
    /// Fails only if `root` itself has no definition.
    pub fn resolve(&self, root: &str) -> ActiongenResult<ResolutionResult> {
        let body = self
            .index
            .locate(root)
            .ok_or_else(|| ActiongenError::root_not_found(root))?;

        let mut ctx = TraversalContext::new(root);
        let actions = parse_variants(body);
        debug!(enum_name = %root, variants = actions.len(), "resolved root");
        self.schedule_dependencies(&mut ctx, root, &actions);

        while let Some(name) = ctx.next_pending() {
            // Only locatable names are ever scheduled.
            let Some(body) = self.index.locate(&name) else {
                continue;
            };
            let variants = parse_variants(body);
            debug!(enum_name = %name, variants = variants.len(), "resolved dependency");
            self.schedule_dependencies(&mut ctx, &name, &variants);
            ctx.resolved.insert(name, variants);
        }

        let result = ctx.finish(actions);
        info!(
            root = %result.root,
            dependencies = result.dependencies.len(),
            "resolution complete"
        );
        Ok(result)
    }

    fn schedule_dependencies(
        &self,
        ctx: &mut TraversalContext,
        owner: &str,
        variants: &[VariantDescriptor],
    ) {
        for payload in variants.iter().filter_map(|v| v.payload_type.as_deref()) {
            for candidate in payload_type_candidates(payload) {
                if !self.index.contains(candidate) {
                    trace!(enum_name = %owner, candidate = %candidate, "not an enum, skipped");
                    continue;
                }
                if ctx.schedule(candidate) {
                    trace!(enum_name = %owner, dependency = %candidate, "dependency scheduled");
                }
            }
        }
    }
}

/// Resolve `root` in `source`, accepting enums of any visibility.
pub fn resolve_all(source: &str, root: &str) -> ActiongenResult<ResolutionResult> {
    let index = SourceIndex::new(source, DeclarationStyle::Any);
    Resolver::new(&index).resolve(root)
}

/// Resolve several independent roots against one index.
///
/// Results come back in the order of `roots`. With the `parallel` feature
/// the roots are resolved on the rayon pool; the index is read-only, so
/// no locking is involved.
pub fn resolve_many<S>(index: &SourceIndex<'_>, roots: &[S]) -> Vec<ActiongenResult<ResolutionResult>>
where
    S: AsRef<str> + Sync,
{
    let resolver = Resolver::new(index);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        roots
            .par_iter()
            .map(|root| resolver.resolve(root.as_ref()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        roots
            .iter()
            .map(|root| resolver.resolve(root.as_ref()))
            .collect()
    }
}
