use crate::common::command::{init_repository_dir, run_sgit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_unchanged_files_with_all_flag(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // a bare status on a clean tree prints nothing
    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert_eq!(stdout, "");

    // with --all every clean path is listed, in canonical order
    let output = run_sgit_command(repository_dir.path(), &["status", "--all"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert_eq!(stdout, "-- 1.txt\n-- a/2.txt\n-- a/b/3.txt\n");

    Ok(())
}
