use crate::common::command::{init_repository_dir, run_sgit_command};
use crate::common::file::delete_path;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_restores_deleted_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    delete_path(&repository_dir.path().join("1.txt"));
    delete_path(&repository_dir.path().join("a"));

    run_sgit_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("1.txt"))?,
        "one"
    );
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("a").join("b").join("3.txt"))?,
        "three"
    );

    Ok(())
}
