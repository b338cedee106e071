//! Top-level packages affected by a seed set.

use super::{DepGraph, Direction, PkgId, Workspace};
use crate::intent::IntentMatcher;

/// Top-level packages that transitively depend on a seed set, split by intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopLevelRdeps {
    /// Top-level ancestors declared in the intent file.
    pub intentional: Vec<String>,
    /// Top-level ancestors nobody declared.
    pub unintentional: Vec<String>,
}

/// What: Find the top-level packages that would be affected by touching `seeds`.
///
/// Inputs:
/// - `graph`: Dependency graph.
/// - `ws`: Workspace; reset on entry.
/// - `matcher`: Intent predicate.
/// - `seeds`: Packages under consideration.
///
/// Output:
/// - Names, in name order, of every ancestor of `seeds` (seeds included) that
///   nothing depends on, partitioned by `matcher`.
pub fn classify_top_level(
    graph: &DepGraph,
    ws: &mut Workspace,
    matcher: &IntentMatcher,
    seeds: &[PkgId],
) -> TopLevelRdeps {
    ws.reset();
    graph.traverse(ws, seeds, Direction::Backward);
    let mut out = TopLevelRdeps::default();
    for id in ws.visited_ids() {
        if !graph.is_top_level(id) {
            continue;
        }
        let name = graph.name(id).to_string();
        if matcher.is_intentional(&name) {
            out.intentional.push(name);
        } else {
            out.unintentional.push(name);
        }
    }
    tracing::debug!(
        intentional = out.intentional.len(),
        unintentional = out.unintentional.len(),
        "classified top-level rdeps"
    );
    out
}
