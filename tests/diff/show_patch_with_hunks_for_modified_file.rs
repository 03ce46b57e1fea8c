use crate::common::command::{
    bit_diff_output, diff_hunks_output, file_a, file_b, new_dir, old_dir, snapshot_dirs,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_patch_with_hunks_for_modified_file(
    snapshot_dirs: TempDir,
    file_a: String,
    file_b: String,
    diff_hunks_output: String,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(old_dir(&snapshot_dirs).join("1.txt"), file_a));
    write_file(FileSpec::new(new_dir(&snapshot_dirs).join("1.txt"), file_b));

    let expected_output = format!(
        "diff --git a/1.txt b/1.txt\nindex 6143f6e..e0b1c3b 100644\n--- a/1.txt\n+++ b/1.txt\n{diff_hunks_output}"
    );
    let actual_output = bit_diff_output(snapshot_dirs.path(), &[]);

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
fn context_lines_follow_the_unified_flag(snapshot_dirs: TempDir, file_a: String, file_b: String) {
    write_file(FileSpec::new(old_dir(&snapshot_dirs).join("1.txt"), file_a));
    write_file(FileSpec::new(new_dir(&snapshot_dirs).join("1.txt"), file_b));

    let actual_output = bit_diff_output(snapshot_dirs.path(), &["-U", "0"]);

    assert!(actual_output.contains("@@ -4,3 +3,0 @@\n-    for i in 0..1000000000 {\n"));
    assert!(actual_output.contains("@@ -16 +13,3 @@\n-    tx.join().unwrap();\n"));
    assert!(!actual_output.contains("\n fn main() {\n"));
}

#[rstest]
fn abbreviation_length_is_configurable(snapshot_dirs: TempDir, file_a: String, file_b: String) {
    write_file(FileSpec::new(old_dir(&snapshot_dirs).join("1.txt"), file_a));
    write_file(FileSpec::new(new_dir(&snapshot_dirs).join("1.txt"), file_b));

    let actual_output = bit_diff_output(snapshot_dirs.path(), &["--abbrev", "12"]);

    assert!(actual_output.contains("\nindex 6143f6ee38c5..e0b1c3b24b3a 100644\n"));
}
