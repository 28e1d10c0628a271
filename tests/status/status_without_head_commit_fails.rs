use crate::common::command::{repository_dir, run_sgit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

// Status reconciles against the HEAD tree, so it needs a resolvable HEAD.
#[rstest]
fn status_without_head_commit_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resolve revision 'HEAD'"));

    Ok(())
}
