//! Combined forward and backward subgraph around a seed set.

use std::collections::HashSet;

use super::{DepGraph, Direction, PkgId, Workspace};

/// What: Nodes and edges describing what seeds need and what needs them.
///
/// Details:
/// - Every edge is `(dependent, dependency)`, the same orientation as trace paths.
/// - Forward-closure edges come first, then ancestor edges; duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphExport {
    /// Seed names, highlighted by the renderer.
    pub highlighted: Vec<String>,
    /// Directed `dependent -> dependency` edges.
    pub edges: Vec<(String, String)>,
}

/// What: Collect the forward and backward neighbourhood of `seeds`.
///
/// Inputs:
/// - `graph`: Dependency graph.
/// - `ws`: Workspace; reset on entry.
/// - `seeds`: Packages of interest.
///
/// Output:
/// - The seed names plus every dependency edge leaving a member of the forward
///   closure and every edge entering a member of the backward closure.
pub fn export_graph(graph: &DepGraph, ws: &mut Workspace, seeds: &[PkgId]) -> GraphExport {
    let mut seen: HashSet<(PkgId, PkgId)> = HashSet::new();
    let mut export = GraphExport {
        highlighted: graph.names(seeds),
        edges: Vec::new(),
    };
    let mut push = |from: PkgId, to: PkgId| {
        if seen.insert((from, to)) {
            export
                .edges
                .push((graph.name(from).to_string(), graph.name(to).to_string()));
        }
    };

    ws.reset();
    graph.traverse(ws, seeds, Direction::Forward);
    for id in ws.visited_ids() {
        for &dep in graph.deps(id) {
            push(id, dep);
        }
    }

    ws.reset();
    graph.traverse(ws, seeds, Direction::Backward);
    for id in ws.visited_ids() {
        for &rdep in graph.rdeps(id) {
            push(rdep, id);
        }
    }
    ws.reset();

    tracing::debug!(edges = export.edges.len(), "exported graph");
    export
}
