//! Mode dispatch tying the catalog, intent file and graph engine together.
//!
//! Everything is computed before any package manager command runs, and a
//! failure at any stage stops the run before execution.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::catalog::{self, PackageSystem};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::graph::{self, DepGraph, Workspace};
use crate::intent::{self, IntentMatcher, is_glob};
use crate::render;
use crate::util::command::CommandRunner;
use crate::util::rooted;

/// What: Everything a run needs from its surroundings.
///
/// Details:
/// - `cwd` resolves a relative `-f` path; `runner` executes intent commands
///   and the final package manager command.
pub struct Env<'a> {
    /// User settings.
    pub settings: &'a Settings,
    /// Working directory for relative paths.
    pub cwd: &'a Path,
    /// Command executor.
    pub runner: &'a dyn CommandRunner,
}

/// Loaded state shared by the graph-based modes.
struct Session<'a> {
    /// Command-line arguments.
    args: &'a Args,
    /// Surroundings.
    env: &'a Env<'a>,
    /// Detected backend.
    system: Box<dyn PackageSystem>,
    /// Intent file as the user named it.
    intent_path: PathBuf,
    /// Declared intent patterns.
    declared: std::collections::BTreeSet<String>,
    /// Compiled intent predicate.
    matcher: IntentMatcher,
    /// Dependency graph.
    graph: DepGraph,
    /// Reusable query workspace.
    ws: Workspace,
}

/// What: Execute one pkgtrim invocation.
///
/// Inputs:
/// - `args`: Parsed command line.
/// - `env`: Settings, working directory and command runner.
/// - `out`: Report destination.
///
/// Output:
/// - `Ok(())` after the selected mode finished.
///
/// # Errors
/// - Returns any catalog, intent, query or execution error; see [`Error`].
pub fn run(args: &Args, env: &Env<'_>, out: &mut dyn Write) -> Result<()> {
    let system = catalog::detect(&args.root)?;
    let mut packages = system.packages()?;
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!(backend = system.name(), packages = packages.len(), "loaded catalog");

    if args.dump_packages {
        if args.json {
            render::packages_json(out, &packages)?;
        } else {
            render::packages(out, &packages)?;
        }
        return Ok(());
    }

    let default_path = env.settings.default_trimfile();
    let intent_path = args.file.clone().unwrap_or_else(|| default_path.clone());
    let explicit = intent_path != default_path;
    let declared = intent::load(
        &rooted(&args.root, env.cwd, &intent_path),
        &intent_path,
        explicit,
        env.runner,
    )?;
    if args.dump_config {
        for name in &declared {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let matcher = IntentMatcher::new(&declared)?;
    tracing::debug!(expression = matcher.as_str(), "compiled intent patterns");
    let graph = DepGraph::build(packages)?;
    let ws = graph.workspace();
    let mut session = Session {
        args,
        env,
        system,
        intent_path,
        declared,
        matcher,
        graph,
        ws,
    };

    if args.install {
        return session.install(out);
    }
    if args.graph {
        return session.graph(out);
    }
    if args.trace {
        return session.trace(out);
    }
    if args.packages.is_empty() {
        session.unintentional(out)
    } else {
        session.seeded(out)
    }
}

impl Session<'_> {
    /// Install declared packages that are missing; globs are skipped.
    fn install(&self, out: &mut dyn Write) -> Result<()> {
        let (globs, missing): (Vec<&String>, Vec<&String>) = self
            .declared
            .iter()
            .filter(|name| self.graph.id(name).is_none())
            .partition(|name| is_glob(name));
        if !globs.is_empty() {
            let globs: Vec<&str> = globs.iter().map(|s| s.as_str()).collect();
            writeln!(out, "Warning, ignoring globs: {}.", globs.join(" "))?;
        }
        if missing.is_empty() {
            writeln!(out, "Nothing new to install.")?;
            return Ok(());
        }
        let names: Vec<String> = missing.into_iter().cloned().collect();
        let argv = self
            .env
            .settings
            .privileged(self.system.install_command(&names));
        render::command(out, &argv)?;
        if self.args.dry_run {
            return Ok(());
        }
        self.env.runner.execute("install packages", &argv)
    }

    /// Resolve every positional argument to an id.
    fn seeds(&self) -> Result<Vec<graph::PkgId>> {
        self.args
            .packages
            .iter()
            .map(|name| self.graph.lookup(name))
            .collect()
    }

    /// Print the dot graph around the positional packages.
    fn graph(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.args.packages.is_empty() {
            return Err(Error::Usage(
                "--graph requires some arguments, got none".to_string(),
            ));
        }
        let seeds = self.seeds()?;
        let export = graph::export_graph(&self.graph, &mut self.ws, &seeds);
        render::graph(out, &export)?;
        Ok(())
    }

    /// Print every path between the two positional packages.
    fn trace(&mut self, out: &mut dyn Write) -> Result<()> {
        let [src, dst] = self.args.packages.as_slice() else {
            return Err(Error::Usage(format!(
                "--trace requires exactly 2 arguments, got {}",
                self.args.packages.len()
            )));
        };
        let src_id = self.graph.lookup(src)?;
        let dst_id = self.graph.lookup(dst)?;
        let paths = graph::trace_paths(&self.graph, &mut self.ws, src_id, dst_id)?;
        render::trace(out, src, dst, &paths)?;
        Ok(())
    }

    /// Shared/unique breakdown and affected top-level packages of the arguments.
    fn seeded(&mut self, out: &mut dyn Write) -> Result<()> {
        let seeds = self.seeds()?;
        let closure = graph::compute_closure(&self.graph, &mut self.ws, &seeds);
        let rdeps = graph::classify_top_level(&self.graph, &mut self.ws, &self.matcher, &seeds);
        render::closure_report(out, &self.graph, &closure, &rdeps)?;
        if self.args.remove {
            let candidates = self.graph.names(&closure.unique);
            return self.remove(out, &candidates);
        }
        Ok(())
    }

    /// Report every unintentional top-level package by unique cost.
    fn unintentional(&mut self, out: &mut dyn Write) -> Result<()> {
        let entries = graph::unintentional_report(&self.graph, &mut self.ws, &self.matcher);
        if entries.is_empty() && !self.args.remove {
            writeln!(
                out,
                "No unintentional packages found. Use `-f /dev/null` to print all."
            )?;
            return Ok(());
        }
        render::unintentional(out, &self.graph, &entries)?;
        if self.args.remove {
            let candidates =
                graph::unintentional_removal_candidates(&self.graph, &mut self.ws, &self.matcher);
            return self.remove(out, &candidates);
        }
        Ok(())
    }

    /// What: Protect, print and (unless dry-run) remove `candidates`.
    ///
    /// # Errors
    /// - Returns `Err(Error::NothingToRemove)` after explaining what was kept.
    fn remove(&mut self, out: &mut dyn Write, candidates: &[String]) -> Result<()> {
        let plan = match graph::plan_removal(&self.graph, &mut self.ws, &self.matcher, candidates)
        {
            Ok(plan) => plan,
            Err(Error::NothingToRemove { kept }) => {
                render::kept(out, &self.intent_path, &kept)?;
                return Err(Error::NothingToRemove { kept });
            }
            Err(err) => return Err(err),
        };
        render::kept(out, &self.intent_path, &plan.kept)?;
        let argv = self
            .env
            .settings
            .privileged(self.system.remove_command(&plan.remove));
        render::command(out, &argv)?;
        if self.args.dry_run {
            return Ok(());
        }
        writeln!(out)?;
        self.env.runner.execute("remove selected packages", &argv)
    }
}
