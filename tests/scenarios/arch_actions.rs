//! Install and remove flows on an Arch root, plus failure reporting.

use super::common::{TRIMFILE, RecordingRunner, Spec, arch_root, run, run_with, settings, write_file};

/// `a -> b -> c` and a second top-level `d -> c`.
const FORK: &[Spec<'static>] = &[
    ("a", 10, &["b"], "package a"),
    ("b", 20, &["c"], "package b"),
    ("c", 30, &[], "package c"),
    ("d", 5, &["c"], "package d"),
];

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
/// What: Dry-run removal of all unintentional packages prints but never executes.
///
/// Inputs:
/// - [`FORK`] with `d` declared.
///
/// Output:
/// - `sudo pacman -R a b`; `c` survives because `d` needs it.
fn remove_unintentional_dry_run() {
    let root = arch_root(FORK);
    write_file(root.path(), TRIMFILE, "d\n");
    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings(), &runner, &["--remove", "--dry-run"]);
    result.unwrap();
    assert!(out.ends_with("sudo pacman -R a b\n"));
    assert!(runner.executed.borrow().is_empty());
}

#[test]
/// What: Without `--dry-run` the printed command is executed verbatim.
fn remove_executes_the_printed_command() {
    let root = arch_root(FORK);
    write_file(root.path(), TRIMFILE, "d\n");
    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings(), &runner, &["--remove"]);
    result.unwrap();
    assert!(out.ends_with("sudo pacman -R a b\n\n"));
    assert_eq!(
        *runner.executed.borrow(),
        vec![(
            "remove selected packages".to_string(),
            strings(&["sudo", "pacman", "-R", "a", "b"])
        )]
    );
}

#[test]
/// What: An intended member of the seeded closure keeps itself and its dependencies.
///
/// Inputs:
/// - `--remove a` on `a -> b -> c` with `b` declared.
///
/// Output:
/// - Keeping message naming `b c`, then `sudo pacman -R a`.
fn seeded_remove_keeps_intended_dependencies() {
    let root = arch_root(&FORK[..3]);
    write_file(root.path(), TRIMFILE, "b\n");
    let (result, out) = run(root.path(), &["--remove", "--dry-run", "a"]);
    result.unwrap();
    assert!(out.ends_with(
        "Keeping packages intended directly or indirectly by /home/user/.pkgtrim: b c.\n\n\
         sudo pacman -R a\n"
    ));
}

#[test]
/// What: Protection that keeps everything is reported as an error after the explanation.
fn fully_protected_removal_fails() {
    let root = arch_root(&FORK[..3]);
    write_file(root.path(), TRIMFILE, "b\n");
    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings(), &runner, &["--remove", "b"]);
    assert_eq!(result.unwrap_err().to_string(), "nothing to remove");
    assert!(out.contains("Keeping packages intended directly or indirectly by /home/user/.pkgtrim: b c.\n"));
    assert!(runner.executed.borrow().is_empty());
}

#[test]
/// What: An empty privilege command runs the package manager directly.
fn empty_privilege_command_is_not_prepended() {
    let root = arch_root(FORK);
    let mut settings = settings();
    settings.privilege_command = String::new();
    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings, &runner, &["--remove", "--dry-run", "d"]);
    result.unwrap();
    assert!(out.ends_with("pacman -R d\n"));
    assert!(!out.contains("sudo"));
}

#[test]
/// What: Missing declared packages are installed; globs are skipped with a warning.
fn install_missing_declared_packages() {
    let root = arch_root(FORK);
    write_file(root.path(), TRIMFILE, "a\nnewpkg\nlib*\nzsh\n");
    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings(), &runner, &["--install"]);
    result.unwrap();
    assert_eq!(
        out,
        "Warning, ignoring globs: lib*.\nsudo pacman -S newpkg zsh\n"
    );
    assert_eq!(
        *runner.executed.borrow(),
        vec![(
            "install packages".to_string(),
            strings(&["sudo", "pacman", "-S", "newpkg", "zsh"])
        )]
    );
}

#[test]
fn install_with_everything_present() {
    let root = arch_root(FORK);
    write_file(root.path(), TRIMFILE, "a\nd\n");
    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings(), &runner, &["--install"]);
    result.unwrap();
    assert_eq!(out, "Nothing new to install.\n");
    assert!(runner.executed.borrow().is_empty());
}

#[test]
fn unknown_package_is_reported() {
    let root = arch_root(FORK);
    let (result, out) = run(root.path(), &["zzz"]);
    assert_eq!(result.unwrap_err().to_string(), "package zzz not found");
    assert!(out.is_empty());
}

#[test]
fn trace_argument_count_is_checked() {
    let root = arch_root(FORK);
    let (result, _) = run(root.path(), &["--trace", "a"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "--trace requires exactly 2 arguments, got 1"
    );
    let (result, _) = run(root.path(), &["--graph"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "--graph requires some arguments, got none"
    );
}

#[test]
fn trace_to_a_non_dependency_fails() {
    let root = arch_root(FORK);
    let (result, _) = run(root.path(), &["--trace", "c", "a"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "package a is not a dependency of c"
    );
}

#[test]
/// What: A missing explicit intent file is an error, a missing default one is not.
fn missing_intent_files() {
    let root = arch_root(FORK);
    let (result, _) = run(root.path(), &["-f", "nope.txt"]);
    assert!(
        result
            .unwrap_err()
            .to_string()
            .starts_with("open trimfile nope.txt: ")
    );
    let (result, _) = run(root.path(), &[]);
    result.unwrap();
}

#[test]
/// What: A failing `!command` aborts with the file, line and command.
fn failing_intent_command_aborts() {
    let root = arch_root(FORK);
    write_file(root.path(), TRIMFILE, "a\n!broken\n");
    let runner = RecordingRunner::default();
    let (result, _) = run_with(root.path(), &settings(), &runner, &["--remove", "a"]);
    let message = result.unwrap_err().to_string();
    assert!(message.starts_with("parse /home/user/.pkgtrim: execute line 2: \"broken\": "));
    assert!(runner.executed.borrow().is_empty());
}

#[test]
fn unsupported_root_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    let (result, _) = run(root.path(), &[]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "detect package system: no supported system detected"
    );
}

#[test]
/// What: A dependency nobody provides aborts before any report.
fn unresolved_dependency_aborts() {
    let root = arch_root(&[("a", 1, &["ghost>=2"], "")]);
    let (result, out) = run(root.path(), &[]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "resolve a: no provider found for dependency ghost"
    );
    assert!(out.is_empty());
}
