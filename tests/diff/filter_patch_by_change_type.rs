use crate::common::command::{bit_diff_output, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

fn write_changes(dir: &TempDir) {
    write_file(FileSpec::new(old_dir(dir).join("deleted.txt"), "one\n".to_string()));
    write_file(FileSpec::new(old_dir(dir).join("modified.txt"), "one\n".to_string()));
    write_file(FileSpec::new(new_dir(dir).join("modified.txt"), "two\n".to_string()));
    write_file(FileSpec::new(new_dir(dir).join("added.txt"), "three\n".to_string()));
}

fn headers(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.starts_with("diff --git"))
        .collect()
}

#[rstest]
#[case("D", vec!["diff --git a/deleted.txt b/deleted.txt"])]
#[case("A", vec!["diff --git a/added.txt b/added.txt"])]
#[case("AM", vec![
    "diff --git a/added.txt b/added.txt",
    "diff --git a/modified.txt b/modified.txt",
])]
#[case("R", vec![])]
fn filter_patch_by_change_type(
    snapshot_dirs: TempDir,
    #[case] filter: &str,
    #[case] expected: Vec<&str>,
) {
    write_changes(&snapshot_dirs);

    let diff_filter = format!("--diff-filter={filter}");
    let actual_output = bit_diff_output(snapshot_dirs.path(), &[&diff_filter]);

    pretty_assertions::assert_eq!(headers(&actual_output), expected);
}
