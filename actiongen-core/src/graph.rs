//! Dependency graph of a resolved enum hierarchy, with Graphviz export.
//!
//! Nodes are the root and its dependencies. An edge `A -> B` means some
//! variant of `A` names `B` in its payload. Self-edges and edges back to
//! the root are kept, so cycles stay visible.

use std::fmt::Write;

use petgraph::graphmap::DiGraphMap;

use crate::resolve::ResolutionResult;
use crate::variants::payload_type_candidates;

/// Builds the enum dependency graph of `result`.
pub fn build_graph(result: &ResolutionResult) -> DiGraphMap<&str, ()> {
    let mut g = DiGraphMap::new();

    g.add_node(result.root.as_str());
    for name in result.dependency_names() {
        g.add_node(name);
    }

    for (owner, variant) in result.variants() {
        let Some(payload) = variant.payload_type.as_deref() else {
            continue;
        };
        for candidate in payload_type_candidates(payload) {
            if g.contains_node(candidate) {
                g.add_edge(owner, candidate, ());
            }
        }
    }

    g
}

/// Generate a Graphviz DOT representation of the hierarchy.
///
/// - the root is lightblue
/// - dependencies are lightgrey
pub fn generate_dot(result: &ResolutionResult) -> String {
    let g = build_graph(result);
    let estimated_capacity = (g.node_count() * 60) + (g.edge_count() * 40) + 150;
    let mut dot = String::with_capacity(estimated_capacity);

    if let Err(e) = write_dot_content(&mut dot, &g, &result.root) {
        tracing::error!(error = %e, "failed to generate DOT string");
        return "digraph actiongen {\n}\n".to_string();
    }

    dot
}

fn write_dot_content(
    dot: &mut String,
    g: &DiGraphMap<&str, ()>,
    root: &str,
) -> std::fmt::Result {
    writeln!(dot, "digraph actiongen {{")?;
    writeln!(dot, "  rankdir=LR;")?;
    writeln!(dot, "  node [shape=box, style=filled];")?;
    writeln!(dot)?;

    for name in g.nodes() {
        let color = if name == root { "lightblue" } else { "lightgrey" };
        writeln!(dot, "  \"{}\" [fillcolor={}];", name, color)?;
    }

    writeln!(dot)?;

    for (from, to, _) in g.all_edges() {
        writeln!(dot, "  \"{}\" -> \"{}\";", from, to)?;
    }

    writeln!(dot, "}}")?;
    Ok(())
}
