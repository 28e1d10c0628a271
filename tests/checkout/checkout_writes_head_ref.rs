use crate::common::command::{init_repository_dir, run_sgit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_writes_head_ref(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_sgit_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();

    let head = std::fs::read_to_string(repository_dir.path().join(".git").join("HEAD"))?;
    assert_eq!(head.trim(), "ref: refs/heads/master");

    Ok(())
}
