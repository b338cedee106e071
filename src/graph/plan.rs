//! Protected removal planning.

use super::{DepGraph, Direction, Workspace};
use crate::error::{Error, Result};
use crate::intent::IntentMatcher;

/// What: Final removal list after protection.
///
/// Details:
/// - `remove` and `kept` partition the candidates, each keeping candidate order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    /// Candidates that are safe to remove.
    pub remove: Vec<String>,
    /// Candidates kept because an intended candidate needs them.
    pub kept: Vec<String>,
}

/// What: Drop candidates that an intended candidate still needs.
///
/// Inputs:
/// - `graph`: Dependency graph.
/// - `ws`: Workspace; reset on entry.
/// - `matcher`: Intent predicate.
/// - `candidates`: Names proposed for removal.
///
/// Output:
/// - The [`RemovalPlan`].
///
/// # Errors
/// - Returns `Err(Error::PackageNotFound)` for a candidate that is not installed.
/// - Returns `Err(Error::NothingToRemove)` when protection keeps every candidate.
///
/// Details:
/// - Protection only starts from candidates that are themselves intended. An
///   intended package outside `candidates` protects nothing.
pub fn plan_removal(
    graph: &DepGraph,
    ws: &mut Workspace,
    matcher: &IntentMatcher,
    candidates: &[String],
) -> Result<RemovalPlan> {
    let ids = candidates
        .iter()
        .map(|name| graph.lookup(name))
        .collect::<Result<Vec<_>>>()?;

    ws.reset();
    let protected: Vec<_> = ids
        .iter()
        .copied()
        .filter(|&id| matcher.is_intentional(graph.name(id)))
        .collect();
    graph.traverse(ws, &protected, Direction::Forward);

    let mut plan = RemovalPlan::default();
    for (name, &id) in candidates.iter().zip(&ids) {
        if ws.is_visited(id) {
            plan.kept.push(name.clone());
        } else {
            plan.remove.push(name.clone());
        }
    }
    ws.reset();
    tracing::info!(
        remove = plan.remove.len(),
        kept = plan.kept.len(),
        "planned removal"
    );
    if plan.remove.is_empty() {
        return Err(Error::NothingToRemove { kept: plan.kept });
    }
    Ok(plan)
}
