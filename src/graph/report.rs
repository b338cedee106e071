//! Whole-catalog report of unintentional top-level packages.

use super::{DepGraph, PkgId, Workspace, compute_closure};
use crate::intent::IntentMatcher;

/// One unintentional top-level package and what removing it would free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnintentionalEntry {
    /// The top-level package.
    pub id: PkgId,
    /// Bytes freed by removing it with its unique dependencies.
    pub unique_size: u64,
}

/// Top-level packages not matched by the intent predicate, in name order.
fn unintentional_top_level(graph: &DepGraph, matcher: &IntentMatcher) -> Vec<PkgId> {
    graph
        .ids()
        .filter(|&id| graph.is_top_level(id) && !matcher.is_intentional(graph.name(id)))
        .collect()
}

/// What: Unique cost of every unintentional top-level package.
///
/// Inputs:
/// - `graph`: Dependency graph.
/// - `ws`: Workspace reused across the per-package closures.
/// - `matcher`: Intent predicate.
///
/// Output:
/// - Entries sorted by ascending unique size so the biggest offenders come
///   last; equal sizes keep name order. Empty when everything is intended.
pub fn unintentional_report(
    graph: &DepGraph,
    ws: &mut Workspace,
    matcher: &IntentMatcher,
) -> Vec<UnintentionalEntry> {
    let mut entries: Vec<UnintentionalEntry> = unintentional_top_level(graph, matcher)
        .into_iter()
        .map(|id| UnintentionalEntry {
            id,
            unique_size: compute_closure(graph, ws, &[id]).unique_size,
        })
        .collect();
    ws.reset();
    entries.sort_by_key(|e| e.unique_size);
    tracing::info!(count = entries.len(), "computed unintentional report");
    entries
}

/// What: Everything that goes away when all unintentional top-level packages do.
///
/// Inputs:
/// - `graph`: Dependency graph.
/// - `ws`: Workspace; reset on entry.
/// - `matcher`: Intent predicate.
///
/// Output:
/// - Sorted names of the unique members of the closure seeded by every
///   unintentional top-level package.
pub fn unintentional_removal_candidates(
    graph: &DepGraph,
    ws: &mut Workspace,
    matcher: &IntentMatcher,
) -> Vec<String> {
    let seeds = unintentional_top_level(graph, matcher);
    let closure = compute_closure(graph, ws, &seeds);
    graph.names(&closure.unique)
}
