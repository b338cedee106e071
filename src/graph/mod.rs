//! In-memory dependency graph over the installed package catalog.
//!
//! Packages are addressed by dense [`PkgId`]s assigned in name order, so every
//! per-package mark lives in a plain vector. Queries borrow a caller-owned
//! [`Workspace`] for their marks and order buffer instead of allocating or
//! sharing hidden state.

pub mod closure;
pub mod export;
pub mod plan;
pub mod report;
pub mod toplevel;
pub mod trace;

use std::collections::HashMap;

use crate::catalog::Package;
use crate::error::{Error, Result};

pub use closure::{Closure, compute_closure};
pub use export::{GraphExport, export_graph};
pub use plan::{RemovalPlan, plan_removal};
pub use report::{UnintentionalEntry, unintentional_removal_candidates, unintentional_report};
pub use toplevel::{TopLevelRdeps, classify_top_level};
pub use trace::trace_paths;

/// Dense package identifier, an index into the graph's vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PkgId(u32);

impl PkgId {
    /// Vector index of this id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which adjacency a traversal follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// From a package to the packages it depends on.
    Forward,
    /// From a package to the packages depending on it.
    Backward,
}

/// What: Forward and reverse adjacency built from a closed-world catalog.
///
/// Inputs: Package list from a [`crate::catalog::PackageSystem`].
///
/// Output: Name lookup plus `deps`/`rdeps` vectors indexed by [`PkgId`].
///
/// Details:
/// - `j` is in `rdeps[i]` exactly when `i` is in `deps[j]`.
/// - Cycles are allowed; every traversal marks nodes before descending.
#[derive(Debug, Clone)]
pub struct DepGraph {
    /// Packages sorted by name; position is the id.
    packages: Vec<Package>,
    /// Name to id.
    ids: HashMap<String, PkgId>,
    /// Direct dependencies.
    deps: Vec<Vec<PkgId>>,
    /// Direct reverse dependencies.
    rdeps: Vec<Vec<PkgId>>,
}

impl DepGraph {
    /// What: Build the graph, assigning ids in package name order.
    ///
    /// Inputs:
    /// - `packages`: Installed packages with resolved dependency names.
    ///
    /// Output:
    /// - The graph; duplicate dependency names collapse into one edge.
    ///
    /// # Errors
    /// - Returns `Err(Error::DuplicatePackage)` when two packages share a name.
    /// - Returns `Err(Error::UnknownDependency)` when a dependency is not in `packages`.
    pub fn build(mut packages: Vec<Package>) -> Result<Self> {
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        let mut ids: HashMap<String, PkgId> = HashMap::with_capacity(packages.len());
        for (i, p) in packages.iter().enumerate() {
            if ids.insert(p.name.clone(), PkgId(to_id(i))).is_some() {
                return Err(Error::DuplicatePackage(p.name.clone()));
            }
        }

        let n = packages.len();
        let mut deps: Vec<Vec<PkgId>> = vec![Vec::new(); n];
        let mut rdeps: Vec<Vec<PkgId>> = vec![Vec::new(); n];
        for (i, pkg) in packages.iter().enumerate() {
            for dep in &pkg.depends {
                let Some(&j) = ids.get(dep) else {
                    return Err(Error::UnknownDependency {
                        package: pkg.name.clone(),
                        dependency: dep.clone(),
                    });
                };
                if !deps[i].contains(&j) {
                    deps[i].push(j);
                    rdeps[j.index()].push(PkgId(to_id(i)));
                }
            }
        }
        tracing::debug!(
            packages = n,
            edges = deps.iter().map(Vec::len).sum::<usize>(),
            "built dependency graph"
        );
        Ok(Self {
            packages,
            ids,
            deps,
            rdeps,
        })
    }

    /// Number of packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Id of `name`, if installed.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<PkgId> {
        self.ids.get(name).copied()
    }

    /// What: Id of `name` for query arguments.
    ///
    /// # Errors
    /// - Returns `Err(Error::PackageNotFound)` when `name` is not installed.
    pub fn lookup(&self, name: &str) -> Result<PkgId> {
        self.id(name)
            .ok_or_else(|| Error::PackageNotFound(name.to_string()))
    }

    /// Package record for `id`.
    #[must_use]
    pub fn package(&self, id: PkgId) -> &Package {
        &self.packages[id.index()]
    }

    /// Package name for `id`.
    #[must_use]
    pub fn name(&self, id: PkgId) -> &str {
        &self.packages[id.index()].name
    }

    /// Installed size of `id` in bytes.
    #[must_use]
    pub fn size(&self, id: PkgId) -> u64 {
        self.packages[id.index()].size
    }

    /// Direct dependencies of `id`.
    #[must_use]
    pub fn deps(&self, id: PkgId) -> &[PkgId] {
        &self.deps[id.index()]
    }

    /// Direct reverse dependencies of `id`.
    #[must_use]
    pub fn rdeps(&self, id: PkgId) -> &[PkgId] {
        &self.rdeps[id.index()]
    }

    /// Successors of `id` in `direction`.
    #[must_use]
    pub fn edges(&self, id: PkgId, direction: Direction) -> &[PkgId] {
        match direction {
            Direction::Forward => self.deps(id),
            Direction::Backward => self.rdeps(id),
        }
    }

    /// Whether nothing installed depends on `id`.
    #[must_use]
    pub fn is_top_level(&self, id: PkgId) -> bool {
        self.rdeps[id.index()].is_empty()
    }

    /// Every id in ascending (name) order.
    pub fn ids(&self) -> impl Iterator<Item = PkgId> + '_ {
        (0..self.packages.len()).map(|i| PkgId(to_id(i)))
    }

    /// Names of `ids`, in the given order.
    #[must_use]
    pub fn names(&self, ids: &[PkgId]) -> Vec<String> {
        ids.iter().map(|&id| self.name(id).to_string()).collect()
    }

    /// Fresh workspace sized for this graph.
    #[must_use]
    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.len())
    }

    /// What: Depth-first walk from `seeds` following `direction`.
    ///
    /// Inputs:
    /// - `ws`: Workspace receiving visit marks and the post-order.
    /// - `seeds`: Starting ids; already visited seeds are skipped.
    /// - `direction`: Adjacency to follow.
    ///
    /// Output:
    /// - Marks every reached id and appends it to `ws.order()` only after all
    ///   of its successors, so a forward walk yields a dependency-first order.
    ///
    /// Details:
    /// - Does not reset `ws`, so consecutive calls accumulate one closure.
    /// - Iterative, so deep chains cannot overflow the stack.
    pub fn traverse(&self, ws: &mut Workspace, seeds: &[PkgId], direction: Direction) {
        let mut stack: Vec<(PkgId, usize)> = Vec::new();
        for &seed in seeds {
            if ws.visited[seed.index()] {
                continue;
            }
            ws.visited[seed.index()] = true;
            stack.push((seed, 0));
            while let Some((node, next)) = stack.last_mut() {
                let node = *node;
                let succ = self.edges(node, direction);
                if let Some(&child) = succ.get(*next) {
                    *next += 1;
                    if !ws.visited[child.index()] {
                        ws.visited[child.index()] = true;
                        stack.push((child, 0));
                    }
                } else {
                    stack.pop();
                    ws.order.push(node);
                }
            }
        }
    }
}

/// Convert a vector position into an id payload.
#[allow(clippy::cast_possible_truncation)]
const fn to_id(index: usize) -> u32 {
    index as u32
}

/// What: Reusable per-query marks and order buffer.
///
/// Inputs: Created from [`DepGraph::workspace`].
///
/// Output: `visited`/`shared` marks indexed by [`PkgId`] plus the post-order
/// of the last traversal.
///
/// Details:
/// - Every independent query starts with [`Workspace::reset`]; stale marks from
///   an earlier query would corrupt the next one.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Reached by the current traversal.
    visited: Vec<bool>,
    /// Needed by something outside the current closure.
    shared: Vec<bool>,
    /// Post-order of visited ids.
    order: Vec<PkgId>,
}

impl Workspace {
    /// Workspace for a graph of `n` packages.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            visited: vec![false; n],
            shared: vec![false; n],
            order: Vec::with_capacity(n),
        }
    }

    /// Clear all marks touched by the previous query.
    pub fn reset(&mut self) {
        for id in self.order.drain(..) {
            self.visited[id.index()] = false;
            self.shared[id.index()] = false;
        }
        debug_assert!(!self.visited.contains(&true));
        debug_assert!(!self.shared.contains(&true));
    }

    /// Whether `id` was reached.
    #[must_use]
    pub fn is_visited(&self, id: PkgId) -> bool {
        self.visited[id.index()]
    }

    /// Whether `id` was classified as shared.
    #[must_use]
    pub fn is_shared(&self, id: PkgId) -> bool {
        self.shared[id.index()]
    }

    /// Post-order of the ids visited since the last reset.
    #[must_use]
    pub fn order(&self) -> &[PkgId] {
        &self.order
    }

    /// Visited ids in ascending order.
    #[must_use]
    pub fn visited_ids(&self) -> Vec<PkgId> {
        let mut ids = self.order.clone();
        ids.sort_unstable();
        ids
    }

    /// Record a shared verdict for `id`.
    fn mark_shared(&mut self, id: PkgId) {
        self.shared[id.index()] = true;
    }
}
