use crate::common::command::{bit_diff_output, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

fn write_changes(dir: &TempDir) {
    write_file(FileSpec::new(
        old_dir(dir).join("config.toml"),
        "version = 1\nname = demo\n".to_string(),
    ));
    write_file(FileSpec::new(
        new_dir(dir).join("config.toml"),
        "version = 2\nname = demo\n".to_string(),
    ));
    write_file(FileSpec::new(
        old_dir(dir).join("readme.md"),
        "hello\nworld\n".to_string(),
    ));
    write_file(FileSpec::new(
        new_dir(dir).join("readme.md"),
        "hello\nthere\nworld\n".to_string(),
    ));
}

fn headers(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.starts_with("diff --git"))
        .collect()
}

#[rstest]
#[case(&["-G", "version"], vec!["diff --git a/config.toml b/config.toml"])]
#[case(&["-G", "^there$"], vec![])]
#[case(&["-G", "there"], vec!["diff --git a/readme.md b/readme.md"])]
#[case(&["--ignore-matching", "\\d+"], vec!["diff --git a/readme.md b/readme.md"])]
#[case(&["--ignore-matching", "xxxx"], vec![
    "diff --git a/config.toml b/config.toml",
    "diff --git a/readme.md b/readme.md",
])]
fn filter_patch_by_changed_lines(
    snapshot_dirs: TempDir,
    #[case] args: &[&str],
    #[case] expected: Vec<&str>,
) {
    write_changes(&snapshot_dirs);

    let actual_output = bit_diff_output(snapshot_dirs.path(), args);

    pretty_assertions::assert_eq!(headers(&actual_output), expected);
}

#[rstest]
fn kept_records_are_written_in_full(snapshot_dirs: TempDir) {
    write_changes(&snapshot_dirs);

    let actual_output = bit_diff_output(snapshot_dirs.path(), &["-G", "version"]);

    pretty_assertions::assert_eq!(
        actual_output,
        "diff --git a/config.toml b/config.toml\n\
         index ac16e5c..9e140ef 100644\n\
         --- a/config.toml\n\
         +++ b/config.toml\n\
         @@ -1,2 +1,2 @@\n\
         -version = 1\n\
         +version = 2\n \
         name = demo\n"
    );
}
