//! Scenarios against a fake dpkg status file.

use pkgtrim::util::humanize;

use super::common::{RecordingRunner, TRIMFILE, debian_root, run, run_with, settings, write_file};

const STATUS: &str = "\
Package: app
Status: install ok installed
Installed-Size: 100
Depends: libc6 (>= 2.3), mail-transport-agent | postfix
Description: an application
 with a long description

Package: libc6
Status: install ok installed
Installed-Size: 1000
Description: C library

Package: postfix
Status: install ok installed
Provides: mail-transport-agent
Installed-Size: 50
Description: mail server

Package: removed
Status: deinstall ok config-files
Installed-Size: 5
Description: leftover configuration
";

#[test]
/// What: Removed stanzas are skipped, sizes are KiB and virtual names resolve.
fn dump_packages_from_status_file() {
    let root = debian_root(STATUS);
    let (result, out) = run(root.path(), &["--dump-packages"]);
    result.unwrap();
    assert_eq!(
        out,
        "app 102400 libc6 postfix\nlibc6 1024000\npostfix 51200\n"
    );
}

#[test]
fn unintentional_report_on_debian() {
    let root = debian_root(STATUS);
    let (result, out) = run(root.path(), &[]);
    result.unwrap();
    assert_eq!(
        out,
        format!("{} {:<24} an application\n", humanize(1150 * 1024), "app")
    );
}

#[test]
/// What: Debian removal goes through apt.
fn remove_uses_apt() {
    let root = debian_root(STATUS);
    write_file(root.path(), TRIMFILE, "postfix\n");
    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings(), &runner, &["--remove", "--dry-run", "app"]);
    result.unwrap();
    assert!(out.ends_with(
        "Keeping packages intended directly or indirectly by /home/user/.pkgtrim: postfix.\n\n\
         sudo apt remove app libc6\n"
    ));
    assert!(runner.executed.borrow().is_empty());
}

#[test]
fn unresolved_alternatives_abort() {
    let root = debian_root(
        "Package: app\nStatus: install ok installed\nDepends: foo | bar\nDescription: x\n",
    );
    let (result, _) = run(root.path(), &[]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "resolve app: no provider found for dependency foo | bar"
    );
}

#[test]
/// What: A multi-arch library stays protected by the intended package needing it.
///
/// Inputs:
/// - `libc6` installed for amd64 and i386; declared `app` depends on it.
///
/// Output:
/// - One merged `libc6` and nothing unintentional to report or remove.
fn multi_arch_library_is_merged_and_kept() {
    let root = debian_root(
        "Package: libc6\nStatus: install ok installed\nArchitecture: amd64\nInstalled-Size: 1000\nDescription: C library\n\n\
         Package: libc6\nStatus: install ok installed\nArchitecture: i386\nInstalled-Size: 900\nDescription: C library\n\n\
         Package: app\nStatus: install ok installed\nInstalled-Size: 100\nDepends: libc6\nDescription: an application\n",
    );
    write_file(root.path(), TRIMFILE, "app\n");

    let (result, out) = run(root.path(), &["--dump-packages"]);
    result.unwrap();
    assert_eq!(out, "app 102400 libc6\nlibc6 1945600\n");

    let runner = RecordingRunner::default();
    let (result, out) = run_with(root.path(), &settings(), &runner, &["--remove", "--dry-run"]);
    assert_eq!(result.unwrap_err().to_string(), "nothing to remove");
    assert!(!out.contains("apt remove"));
    assert!(runner.executed.borrow().is_empty());
}
