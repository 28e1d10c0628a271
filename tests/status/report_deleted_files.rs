use crate::common::command::{init_repository_dir, run_sgit_command};
use crate::common::file::delete_path;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_deleted_files(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    delete_path(&repository_dir.path().join("1.txt"));

    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    // deleted locally, the staged entry still matches HEAD
    assert_eq!(stdout, "D- 1.txt\n");

    Ok(())
}
