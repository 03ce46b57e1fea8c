use crate::common::command::{bit_diff, run_bit_diff_command, snapshot_dirs};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reject_missing_directory(snapshot_dirs: TempDir) {
    run_bit_diff_command(snapshot_dirs.path(), &["diff", "old", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[rstest]
#[case(&["--diff-filter=X"], "invalid diff filter")]
#[case(&["-G", "("], "regex")]
#[case(&["--find-renames=101"], "101")]
#[case(&["-G", "a", "--ignore-matching", "b"], "cannot be used with")]
fn reject_invalid_options(
    snapshot_dirs: TempDir,
    #[case] args: &[&str],
    #[case] message: &str,
) {
    bit_diff(snapshot_dirs.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));
}
