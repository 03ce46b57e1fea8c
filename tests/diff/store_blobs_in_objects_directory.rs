use crate::common::command::{bit_diff, bit_diff_output, new_dir, old_dir, snapshot_dirs};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn store_blobs_in_objects_directory(
    snapshot_dirs: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        old_dir(&snapshot_dirs).join("folder.txt"),
        "folder".to_string(),
    ));
    write_file(FileSpec::new(
        new_dir(&snapshot_dirs).join("folder.txt"),
        "folder change".to_string(),
    ));

    bit_diff(snapshot_dirs.path(), &["--objects", "objects"])
        .assert()
        .success();

    let objects = snapshot_dirs.path().join("objects");
    assert!(objects.join("01").join("196353b62db727e6543e0ad042eeeff35365bd").is_file());
    assert!(objects.join("95").join("c4c652068303ce27b372c4691c053bb51e1031").is_file());

    Ok(())
}

#[rstest]
fn stored_objects_lengthen_ambiguous_abbreviations(snapshot_dirs: TempDir) {
    write_file(FileSpec::new(
        old_dir(&snapshot_dirs).join("folder.txt"),
        "folder".to_string(),
    ));
    write_file(FileSpec::new(
        new_dir(&snapshot_dirs).join("folder.txt"),
        "folder change".to_string(),
    ));

    // a stray object sharing the first seven characters of the old blob
    let stray = snapshot_dirs.path().join("objects").join("01");
    std::fs::create_dir_all(&stray).unwrap();
    std::fs::write(stray.join("19635fffffffffffffffffffffffffffffffff"), b"").unwrap();

    let actual_output = bit_diff_output(snapshot_dirs.path(), &["--objects", "objects"]);

    assert!(actual_output.contains("\nindex 01196353..95c4c65 100644\n"));
}
