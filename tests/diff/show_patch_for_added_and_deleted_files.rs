use crate::common::command::{bit_diff_output, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_patch_for_added_and_deleted_files(
    snapshot_dirs: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        old_dir(&snapshot_dirs).join("gone.txt"),
        "one\n".to_string(),
    ));
    write_file(FileSpec::new(
        new_dir(&snapshot_dirs).join("fresh.txt"),
        "two\n".to_string(),
    ));

    let expected_output = "diff --git a/fresh.txt b/fresh.txt\n\
                           new file mode 100644\n\
                           index 0000000..f719efd\n\
                           --- /dev/null\n\
                           +++ b/fresh.txt\n\
                           @@ -0,0 +1 @@\n\
                           +two\n\
                           diff --git a/gone.txt b/gone.txt\n\
                           deleted file mode 100644\n\
                           index 5626abf..0000000\n\
                           --- a/gone.txt\n\
                           +++ /dev/null\n\
                           @@ -1 +0,0 @@\n\
                           -one\n";
    let actual_output = bit_diff_output(snapshot_dirs.path(), &[]);

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
fn nested_files_are_listed_with_slash_paths(snapshot_dirs: TempDir) {
    write_file(FileSpec::new(
        new_dir(&snapshot_dirs).join("a").join("b").join("3.txt"),
        "three\n".to_string(),
    ));

    let actual_output = bit_diff_output(snapshot_dirs.path(), &[]);

    assert!(actual_output.starts_with(
        "diff --git a/a/b/3.txt b/a/b/3.txt\nnew file mode 100644\nindex 0000000..2bdf67a\n"
    ));
}
