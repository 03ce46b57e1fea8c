use crate::common::command::{bit_diff, bit_diff_output, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

fn write_change(dir: &TempDir) {
    write_file(FileSpec::new(old_dir(dir).join("a.txt"), "one\n".to_string()));
    write_file(FileSpec::new(new_dir(dir).join("a.txt"), "two\n".to_string()));
}

#[rstest]
fn output_is_plain_when_not_a_terminal(snapshot_dirs: TempDir) {
    write_change(&snapshot_dirs);

    let actual_output = bit_diff_output(snapshot_dirs.path(), &[]);

    assert!(!actual_output.contains('\u{1b}'));
    assert!(actual_output.starts_with("diff --git a/a.txt b/a.txt\n"));
}

#[rstest]
fn color_always_adds_escape_sequences(snapshot_dirs: TempDir) {
    write_change(&snapshot_dirs);

    let actual_output = bit_diff_output(snapshot_dirs.path(), &["--color", "always"]);

    assert!(actual_output.contains("\u{1b}["));
    assert!(actual_output.contains("diff --git a/a.txt b/a.txt"));
    assert!(actual_output.contains("+two"));
}

#[rstest]
fn verbose_flags_log_records_to_stderr(snapshot_dirs: TempDir) {
    write_change(&snapshot_dirs);

    bit_diff(snapshot_dirs.path(), &["-vv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("diff --git a/a.txt b/a.txt\n"))
        .stderr(predicate::str::contains("formatted"));
}

#[rstest]
fn quiet_by_default(snapshot_dirs: TempDir) {
    write_change(&snapshot_dirs);

    bit_diff(snapshot_dirs.path(), &[])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
