//! Text rendering of engine results.
//!
//! Reports are plain text meant for a terminal; graphs are Graphviz `dot`
//! input (`pkgtrim --graph foo | dot -Tx11`).

use std::io::Write;
use std::path::Path;

use crate::catalog::Package;
use crate::graph::{Closure, DepGraph, GraphExport, TopLevelRdeps, UnintentionalEntry};
use crate::util::humanize;

/// Write `name size dep...` for every package.
///
/// # Errors
/// - Returns `Err` when writing to `out` fails.
pub fn packages(out: &mut dyn Write, pkgs: &[Package]) -> std::io::Result<()> {
    for pkg in pkgs {
        if pkg.depends.is_empty() {
            writeln!(out, "{} {}", pkg.name, pkg.size)?;
        } else {
            writeln!(out, "{} {} {}", pkg.name, pkg.size, pkg.depends.join(" "))?;
        }
    }
    Ok(())
}

/// Write every package as a pretty JSON array.
///
/// # Errors
/// - Returns `Err` when serialization or writing fails.
pub fn packages_json(out: &mut dyn Write, pkgs: &[Package]) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, pkgs)?;
    writeln!(out)
}

/// What: Write the seeded shared/unique report.
///
/// Inputs:
/// - `graph`: Graph the closure was computed on.
/// - `closure`: Closure of the seeds.
/// - `rdeps`: Top-level packages depending on the seeds.
///
/// # Errors
/// - Returns `Err` when writing to `out` fails.
pub fn closure_report(
    out: &mut dyn Write,
    graph: &DepGraph,
    closure: &Closure,
    rdeps: &TopLevelRdeps,
) -> std::io::Result<()> {
    writeln!(
        out,
        "shared dependencies ({}): {}\n",
        humanize(closure.shared_size),
        graph.names(&closure.shared).join(" ")
    )?;
    writeln!(
        out,
        "unique dependencies ({}): {}\n",
        humanize(closure.unique_size),
        graph.names(&closure.unique).join(" ")
    )?;
    writeln!(
        out,
        "intentional top level rdeps: {}\n",
        rdeps.intentional.join(" ")
    )?;
    writeln!(
        out,
        "unintentional top level rdeps: {}\n",
        rdeps.unintentional.join(" ")
    )
}

/// Write one `size name description` line per unintentional package.
///
/// # Errors
/// - Returns `Err` when writing to `out` fails.
pub fn unintentional(
    out: &mut dyn Write,
    graph: &DepGraph,
    entries: &[UnintentionalEntry],
) -> std::io::Result<()> {
    for entry in entries {
        let pkg = graph.package(entry.id);
        writeln!(
            out,
            "{} {:<24} {}",
            humanize(entry.unique_size),
            pkg.name,
            pkg.description
        )?;
    }
    Ok(())
}

/// Explain which candidates were kept and why.
///
/// # Errors
/// - Returns `Err` when writing to `out` fails.
pub fn kept(out: &mut dyn Write, source: &Path, kept: &[String]) -> std::io::Result<()> {
    if kept.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "Keeping packages intended directly or indirectly by {}: {}.\n",
        source.display(),
        kept.join(" ")
    )
}

/// Echo a command line before it runs.
///
/// # Errors
/// - Returns `Err` when writing to `out` fails.
pub fn command(out: &mut dyn Write, argv: &[String]) -> std::io::Result<()> {
    writeln!(out, "{}", argv.join(" "))
}

/// What: Render a graph export as `dot`.
///
/// Details:
/// - Seeds are filled light gray; edges point from dependent to dependency.
///
/// # Errors
/// - Returns `Err` when writing to `out` fails.
pub fn graph(out: &mut dyn Write, export: &GraphExport) -> std::io::Result<()> {
    writeln!(out, "digraph {{")?;
    for name in &export.highlighted {
        writeln!(out, "  \"{name}\" [style=filled fillcolor=lightgray]")?;
    }
    for (from, to) in &export.edges {
        writeln!(out, "  \"{from}\" -> \"{to}\"")?;
    }
    writeln!(out, "}}")
}

/// What: Render traced paths as a strict `dot` digraph, one chain per path.
///
/// # Errors
/// - Returns `Err` when writing to `out` fails.
pub fn trace(out: &mut dyn Write, src: &str, dst: &str, paths: &[Vec<String>]) -> std::io::Result<()> {
    writeln!(out, "strict digraph {{")?;
    writeln!(out, "  \"{src}\" [style=filled fillcolor=lightgray]")?;
    writeln!(out, "  \"{dst}\" [style=filled fillcolor=lightgray]")?;
    for path in paths {
        writeln!(out, "  \"{}\"", path.join("\" -> \""))?;
    }
    writeln!(out, "}}")
}
