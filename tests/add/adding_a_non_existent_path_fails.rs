use crate::common::command::{repository_dir, run_sgit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn adding_a_non_existent_path_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_sgit_command(repository_dir.path(), &["add", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be resolved"));

    Ok(())
}
