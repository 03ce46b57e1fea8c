use crate::common::command::{bit_diff_output, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

fn write_both_sides(dir: &TempDir) {
    for path in ["src/main.rs", "src/lib/util.rs", "docs/readme.md", "srcs.txt"] {
        write_file(FileSpec::new(old_dir(dir).join(path), "one\n".to_string()));
        write_file(FileSpec::new(new_dir(dir).join(path), "two\n".to_string()));
    }
}

#[rstest]
fn limit_patch_to_directory_pathspec(snapshot_dirs: TempDir) {
    write_both_sides(&snapshot_dirs);

    let actual_output = bit_diff_output(snapshot_dirs.path(), &["--", "src"]);

    let headers = actual_output
        .lines()
        .filter(|line| line.starts_with("diff --git"))
        .collect::<Vec<_>>();
    pretty_assertions::assert_eq!(
        headers,
        vec![
            "diff --git a/src/lib/util.rs b/src/lib/util.rs",
            "diff --git a/src/main.rs b/src/main.rs",
        ]
    );
}

#[rstest]
fn limit_patch_to_several_file_pathspecs(snapshot_dirs: TempDir) {
    write_both_sides(&snapshot_dirs);

    let actual_output =
        bit_diff_output(snapshot_dirs.path(), &["--", "docs/readme.md", "./srcs.txt"]);

    pretty_assertions::assert_eq!(
        actual_output,
        "diff --git a/docs/readme.md b/docs/readme.md\n\
         index 5626abf..f719efd 100644\n\
         --- a/docs/readme.md\n\
         +++ b/docs/readme.md\n\
         @@ -1 +1 @@\n\
         -one\n\
         +two\n\
         diff --git a/srcs.txt b/srcs.txt\n\
         index 5626abf..f719efd 100644\n\
         --- a/srcs.txt\n\
         +++ b/srcs.txt\n\
         @@ -1 +1 @@\n\
         -one\n\
         +two\n"
    );
}
