use crate::common::command::{init_repository_dir, run_sgit_command};
use crate::common::file::delete_path;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

// Without the removal flag, a path that vanished from the working tree
// keeps its previous index entry.
#[rstest]
fn keep_deleted_files_without_all_flag(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    delete_path(&repository_dir.path().join("a").join("2.txt"));

    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    // still staged, so the deletion is only a working tree change
    assert_eq!(stdout, "D- a/2.txt\n");

    Ok(())
}
