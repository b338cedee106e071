//! Closure and unique-cost computation.
//!
//! The closure of a seed set is everything forward-reachable from it. A
//! closure member is *shared* when something outside the closure, or another
//! shared member, still depends on it; everything else is *unique* and would
//! be freed together with the seeds.

use super::{DepGraph, Direction, PkgId, Workspace};

/// What: Partition of one closure into shared and unique members.
///
/// Details:
/// - `visited` is the disjoint union of `shared` and `unique`.
/// - Seeds are always unique.
/// - All id lists are sorted ascending, which is name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    /// Ids the query started from.
    pub seeds: Vec<PkgId>,
    /// Every id reachable from the seeds, seeds included.
    pub visited: Vec<PkgId>,
    /// Members still needed from outside the closure.
    pub shared: Vec<PkgId>,
    /// Seeds plus members needed only by the closure.
    pub unique: Vec<PkgId>,
    /// Total size of `unique` in bytes.
    pub unique_size: u64,
    /// Total size of `shared` in bytes.
    pub shared_size: u64,
}

/// What: Compute the closure of `seeds` and split it into shared and unique.
///
/// Inputs:
/// - `graph`: Dependency graph.
/// - `ws`: Workspace; reset on entry, left holding this query's marks.
/// - `seeds`: Packages being accounted for.
///
/// Output:
/// - The [`Closure`] with both size totals.
///
/// Details:
/// - Walks the dependency-first order backwards so every reverse dependency of
///   a node is decided before the node itself. Within a cycle, members not yet
///   decided count as unshared.
pub fn compute_closure(graph: &DepGraph, ws: &mut Workspace, seeds: &[PkgId]) -> Closure {
    ws.reset();
    graph.traverse(ws, seeds, Direction::Forward);

    let mut seeds = seeds.to_vec();
    seeds.sort_unstable();
    seeds.dedup();

    for k in (0..ws.order().len()).rev() {
        let i = ws.order()[k];
        if seeds.binary_search(&i).is_ok() {
            continue;
        }
        let shared = graph
            .rdeps(i)
            .iter()
            .any(|&j| !ws.is_visited(j) || ws.is_shared(j));
        if shared {
            ws.mark_shared(i);
        }
    }

    let mut closure = Closure {
        seeds,
        visited: ws.visited_ids(),
        ..Closure::default()
    };
    for &id in &closure.visited {
        if ws.is_shared(id) {
            closure.shared.push(id);
            closure.shared_size += graph.size(id);
        } else {
            closure.unique.push(id);
            closure.unique_size += graph.size(id);
        }
    }
    tracing::debug!(
        seeds = closure.seeds.len(),
        visited = closure.visited.len(),
        shared = closure.shared.len(),
        unique_size = closure.unique_size,
        shared_size = closure.shared_size,
        "computed closure"
    );
    closure
}
