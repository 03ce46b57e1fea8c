use crate::common::command::{bit_diff_output, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{FileSpec, make_file_executable, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[cfg(unix)]
#[rstest]
fn show_mode_change_for_executable_file(
    snapshot_dirs: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = "#!/bin/sh\necho hi\n".to_string();
    write_file(FileSpec::new(old_dir(&snapshot_dirs).join("run.sh"), content.clone()));
    write_file(FileSpec::new(new_dir(&snapshot_dirs).join("run.sh"), content));
    make_file_executable(&new_dir(&snapshot_dirs).join("run.sh"));

    let expected_output = "diff --git a/run.sh b/run.sh\nold mode 100644\nnew mode 100755\n";
    let actual_output = bit_diff_output(snapshot_dirs.path(), &[]);

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn show_mode_and_content_change_without_mode_on_index_line(snapshot_dirs: TempDir) {
    write_file(FileSpec::new(
        old_dir(&snapshot_dirs).join("run.sh"),
        "#!/bin/sh\n".to_string(),
    ));
    write_file(FileSpec::new(
        new_dir(&snapshot_dirs).join("run.sh"),
        "#!/bin/sh\necho hi\n".to_string(),
    ));
    make_file_executable(&new_dir(&snapshot_dirs).join("run.sh"));

    let actual_output = bit_diff_output(snapshot_dirs.path(), &[]);

    assert!(actual_output.starts_with(
        "diff --git a/run.sh b/run.sh\nold mode 100644\nnew mode 100755\nindex "
    ));
    assert!(actual_output.contains("..4163036\n--- a/run.sh\n+++ b/run.sh\n@@ -1 +1,2 @@\n"));
}
