use crate::common::file::create_directory;
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

/// A scratch directory holding an empty `old/` and `new/` snapshot side by side
#[fixture]
pub fn snapshot_dirs() -> TempDir {
    redirect_temp_dir();
    let dir = TempDir::new().expect("Failed to create temp dir");
    create_directory(&dir.path().join("old"));
    create_directory(&dir.path().join("new"));

    dir
}

pub fn old_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("old")
}

pub fn new_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("new")
}

#[fixture]
pub fn file_a() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();
    for i in 0..1000000000 {
        println!("{}",  s);
    }

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    tx.join().unwrap();

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
pub fn file_b() -> String {
    r#"fn main() {
    let s = String::new();
    std::io::stdin().read_line(&mut s).unwrap();

    println!("Done");

    let tx = std::thread::spawn(move || {
        for i in 0..10 {
            println!("Thread: {}", i);
        }
    });

    if let Err(e) = tx.join() {
        eprintln!("Thread error: {}", e);
    }

    println!("All threads completed");
}"#
    .to_string()
}

#[fixture]
pub fn diff_hunks_output() -> String {
    "@@ -1,9 +1,6 @@\n fn main() {\n     let s = String::new();\n     std::io::stdin().read_line(&mut s).unwrap();\n-    for i in 0..1000000000 {\n-        println!(\"{}\",  s);\n-    }\n \n     println!(\"Done\");\n \n@@ -13,7 +10,9 @@\n         }\n     });\n \n-    tx.join().unwrap();\n+    if let Err(e) = tx.join() {\n+        eprintln!(\"Thread error: {}\", e);\n+    }\n \n     println!(\"All threads completed\");\n }\n\\ No newline at end of file\n"
        .to_string()
}

pub fn run_bit_diff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bit-diff").expect("Failed to find bit-diff binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// `bit-diff diff old new <args>` run from the scratch directory
pub fn bit_diff(dir: &Path, args: &[&str]) -> Command {
    let mut all_args = vec!["diff", "old", "new"];
    all_args.extend_from_slice(args);
    run_bit_diff_command(dir, &all_args)
}

/// Stdout of a successful `bit-diff diff old new <args>`
pub fn bit_diff_output(dir: &Path, args: &[&str]) -> String {
    let output = bit_diff(dir, args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("Output is not UTF-8")
}
