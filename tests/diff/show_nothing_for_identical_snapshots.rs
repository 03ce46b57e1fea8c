use crate::common::command::{bit_diff, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{copy_directory, write_generated_files};
use assert_fs::TempDir;
use fake::Fake;
use rstest::rstest;

#[rstest]
fn show_nothing_for_identical_snapshots(
    snapshot_dirs: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let files_count = (1..=8).fake::<usize>();
    write_generated_files(&old_dir(&snapshot_dirs), files_count);
    write_generated_files(&old_dir(&snapshot_dirs).join("nested"), files_count);
    copy_directory(&old_dir(&snapshot_dirs), &new_dir(&snapshot_dirs));

    bit_diff(snapshot_dirs.path(), &[])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());

    Ok(())
}

#[rstest]
fn git_directories_are_not_compared(snapshot_dirs: TempDir) {
    write_generated_files(&old_dir(&snapshot_dirs).join(".git"), 3);
    write_generated_files(&new_dir(&snapshot_dirs).join(".git"), 2);

    bit_diff(snapshot_dirs.path(), &[])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}
