//! Dependency path enumeration between two packages.

use super::{DepGraph, Direction, PkgId, Workspace};
use crate::error::{Error, Result};

/// What: Every simple dependency path from `src` down to `dst`.
///
/// Inputs:
/// - `graph`: Dependency graph.
/// - `ws`: Workspace; reset on entry and left holding the forward closure of `src`.
/// - `src`: Package whose dependency chain is traced.
/// - `dst`: Dependency being explained.
///
/// Output:
/// - Paths as name lists, each starting with `src` and ending with `dst`,
///   every adjacent pair being a direct dependency edge.
///
/// # Errors
/// - Returns `Err(Error::NotADependency)` when `dst` is not reachable from `src`.
///
/// Details:
/// - Searches backwards from `dst` along reverse edges, restricted to the
///   forward closure of `src`, so dead ends are never explored.
pub fn trace_paths(
    graph: &DepGraph,
    ws: &mut Workspace,
    src: PkgId,
    dst: PkgId,
) -> Result<Vec<Vec<String>>> {
    ws.reset();
    graph.traverse(ws, &[src], Direction::Forward);
    if !ws.is_visited(dst) {
        return Err(Error::NotADependency {
            package: graph.name(src).to_string(),
            dependency: graph.name(dst).to_string(),
        });
    }

    let mut tracer = Tracer {
        graph,
        ws,
        src,
        on_path: vec![false; graph.len()],
        path: vec![dst],
        found: Vec::new(),
    };
    tracer.on_path[dst.index()] = true;
    tracer.walk(dst);
    let found = tracer.found;
    tracing::debug!(
        src = graph.name(src),
        dst = graph.name(dst),
        paths = found.len(),
        "traced dependency paths"
    );
    Ok(found)
}

/// Backward depth-first search state.
struct Tracer<'a> {
    /// Graph being searched.
    graph: &'a DepGraph,
    /// Holds the forward closure of `src`.
    ws: &'a Workspace,
    /// Where every path must end up.
    src: PkgId,
    /// Nodes on the current partial path, to keep paths simple.
    on_path: Vec<bool>,
    /// Current partial path, from `dst` upwards.
    path: Vec<PkgId>,
    /// Completed paths in `src`-first order.
    found: Vec<Vec<String>>,
}

impl Tracer<'_> {
    /// Extend the partial path through every reverse dependency of `node`.
    fn walk(&mut self, node: PkgId) {
        if node == self.src {
            let path = self
                .path
                .iter()
                .rev()
                .map(|&id| self.graph.name(id).to_string())
                .collect();
            self.found.push(path);
            return;
        }
        for &rdep in self.graph.rdeps(node) {
            if !self.ws.is_visited(rdep) || self.on_path[rdep.index()] {
                continue;
            }
            self.on_path[rdep.index()] = true;
            self.path.push(rdep);
            self.walk(rdep);
            self.path.pop();
            self.on_path[rdep.index()] = false;
        }
    }
}
