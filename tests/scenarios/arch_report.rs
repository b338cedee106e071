//! Read-only reports on an Arch root: unintentional listing, closures and dumps.

use pkgtrim::util::humanize;

use super::common::{TRIMFILE, RecordingRunner, Spec, arch_root, run, run_with, settings, write_file};

const MB: u64 = 1_000_000;

/// `a -> b -> c`, sizes 10, 20 and 30 MB.
const CHAIN: &[Spec<'static>] = &[
    ("a", 10 * MB, &["b"], "package a"),
    ("b", 20 * MB, &["c"], "package b"),
    ("c", 30 * MB, &[], "package c"),
];

/// [`CHAIN`] plus a second top-level package `d -> c`.
const FORK: &[Spec<'static>] = &[
    ("a", 10 * MB, &["b"], "package a"),
    ("b", 20 * MB, &["c"], "package b"),
    ("c", 30 * MB, &[], "package c"),
    ("d", 5 * MB, &["c"], "package d"),
];

fn report_line(size: u64, name: &str, desc: &str) -> String {
    format!("{} {name:<24} {desc}\n", humanize(size))
}

#[test]
/// What: A lone top-level package accounts for its whole chain.
///
/// Inputs:
/// - [`CHAIN`] and no intent file.
///
/// Output:
/// - One line for `a` with 60 MB.
fn single_top_level_owns_its_chain() {
    let root = arch_root(CHAIN);
    let (result, out) = run(root.path(), &[]);
    result.unwrap();
    assert_eq!(out, report_line(60 * MB, "a", "package a"));
}

#[test]
/// What: A second dependent makes the common dependency shared.
///
/// Inputs:
/// - [`FORK`], seeds `a` then `d`.
///
/// Output:
/// - `a`: shared `c`, unique `a b`; `d`: shared `c`, unique `d`.
fn seeded_report_splits_shared_and_unique() {
    let root = arch_root(FORK);
    let (result, out) = run(root.path(), &["a"]);
    result.unwrap();
    assert_eq!(
        out,
        format!(
            "shared dependencies ({}): c\n\n\
             unique dependencies ({}): a b\n\n\
             intentional top level rdeps: \n\n\
             unintentional top level rdeps: a\n\n",
            humanize(30 * MB),
            humanize(30 * MB)
        )
    );

    let (result, out) = run(root.path(), &["d"]);
    result.unwrap();
    assert!(out.starts_with(&format!(
        "shared dependencies ({}): c\n\nunique dependencies ({}): d\n\n",
        humanize(30 * MB),
        humanize(5 * MB)
    )));
}

#[test]
/// What: The no-seed report lists the cheapest removals first.
fn unintentional_report_is_sorted_by_unique_size() {
    let root = arch_root(FORK);
    let (result, out) = run(root.path(), &[]);
    result.unwrap();
    assert_eq!(
        out,
        format!(
            "{}{}",
            report_line(5 * MB, "d", "package d"),
            report_line(30 * MB, "a", "package a")
        )
    );
}

#[test]
/// What: Top-level rdeps of a shared dependency are split by intent.
fn seeded_report_classifies_top_level_rdeps() {
    let root = arch_root(FORK);
    write_file(root.path(), TRIMFILE, "d\n");
    let (result, out) = run(root.path(), &["c"]);
    result.unwrap();
    assert!(out.contains("intentional top level rdeps: d\n"));
    assert!(out.contains("unintentional top level rdeps: a\n"));
}

#[test]
/// What: Globs only match whole names.
///
/// Inputs:
/// - Top-level `libfoo`, `libbar`, `foolib`; intent `lib*`.
///
/// Output:
/// - Only `foolib` is reported.
fn glob_intent_excludes_matching_names_only() {
    let root = arch_root(&[
        ("foolib", MB, &[], "x"),
        ("libbar", MB, &[], "y"),
        ("libfoo", MB, &[], "z"),
    ]);
    write_file(root.path(), TRIMFILE, "lib*\n");
    let (result, out) = run(root.path(), &[]);
    result.unwrap();
    assert_eq!(out, report_line(MB, "foolib", "x"));
}

#[test]
/// What: Comments, inline comments and `!command` output all declare packages.
fn intent_file_with_comments_and_commands() {
    let root = arch_root(FORK);
    write_file(
        root.path(),
        TRIMFILE,
        "# my machine\nd # editor\n!list-extra\n",
    );
    let runner = RecordingRunner::answering("list-extra", "a\n");

    let (result, out) = run_with(root.path(), &settings(), &runner, &["--dump-config"]);
    result.unwrap();
    assert_eq!(out, "a\nd\n");

    let (result, out) = run_with(root.path(), &settings(), &runner, &[]);
    result.unwrap();
    assert_eq!(
        out,
        "No unintentional packages found. Use `-f /dev/null` to print all.\n"
    );
}

#[test]
/// What: An explicit empty intent file shows every top-level package.
fn explicit_empty_file_reports_everything() {
    let root = arch_root(FORK);
    write_file(root.path(), TRIMFILE, "a\nd\n");
    write_file(root.path(), "/dev/null", "");
    let (result, out) = run(root.path(), &["-f", "/dev/null"]);
    result.unwrap();
    assert_eq!(out.lines().count(), 2);
}

#[test]
/// What: Relative intent paths resolve against the working directory.
fn relative_intent_file_resolves_against_cwd() {
    let root = arch_root(FORK);
    write_file(root.path(), "/home/user/lists/desk", "a\n");
    let (result, out) = run(root.path(), &["-f", "lists/../lists/desk", "--dump-config"]);
    result.unwrap();
    assert_eq!(out, "a\n");
}

#[test]
/// What: Repeated runs over the same root give identical reports.
fn reports_are_deterministic() {
    let root = arch_root(FORK);
    let first = run(root.path(), &["a", "d"]).1;
    let second = run(root.path(), &["d", "a"]).1;
    assert_eq!(first, second);
}

#[test]
fn dump_packages_lists_resolved_dependencies() {
    let root = arch_root(CHAIN);
    let (result, out) = run(root.path(), &["--dump-packages"]);
    result.unwrap();
    assert_eq!(out, "a 10000000 b\nb 20000000 c\nc 30000000\n");
}

#[test]
fn dump_packages_as_json() {
    let root = arch_root(CHAIN);
    let (result, out) = run(root.path(), &["--dump-packages", "--json"]);
    result.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["name"], "a");
    assert_eq!(value[0]["depends"][0], "b");
    assert_eq!(value[2]["size"], 30 * MB);
}

#[test]
/// What: `--trace` prints every dependency path as a strict digraph.
fn trace_prints_all_paths() {
    let root = arch_root(&[
        ("app", 1, &["gtk", "qt"], ""),
        ("gtk", 1, &["png"], ""),
        ("png", 1, &[], ""),
        ("qt", 1, &["png"], ""),
    ]);
    let (result, out) = run(root.path(), &["--trace", "app", "png"]);
    result.unwrap();
    assert!(out.starts_with("strict digraph {\n"));
    assert!(out.contains("  \"app\" -> \"gtk\" -> \"png\"\n"));
    assert!(out.contains("  \"app\" -> \"qt\" -> \"png\"\n"));
    assert!(out.ends_with("}\n"));
}

#[test]
/// What: `--graph` highlights the seeds and keeps edges dependent-first.
fn graph_highlights_seeds() {
    let root = arch_root(FORK);
    let (result, out) = run(root.path(), &["--graph", "b"]);
    result.unwrap();
    assert!(out.starts_with("digraph {\n"));
    assert!(out.contains("  \"b\" [style=filled fillcolor=lightgray]\n"));
    assert!(out.contains("  \"b\" -> \"c\"\n"));
    assert!(out.contains("  \"a\" -> \"b\"\n"));
    assert!(!out.contains("\"d\" -> \"c\""));
}
