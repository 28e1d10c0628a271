use crate::common::command::{init_repository_dir, run_sgit_command};
use crate::common::file::delete_path;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_staged_deletion_against_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    delete_path(&repository_dir.path().join("1.txt"));

    // stage the deletion
    run_sgit_command(repository_dir.path(), &["add", "--all", "."])
        .assert()
        .success();

    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    // gone from disk and index, still in HEAD: marked for removal
    assert_eq!(stdout, "DR 1.txt\n");

    Ok(())
}
