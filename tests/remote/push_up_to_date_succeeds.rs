use crate::common::command::{init_repository_dir, repository_dir, run_sgit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn push_up_to_date_succeeds(
    init_repository_dir: TempDir,
    #[from(repository_dir)] clone_parent: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = init_repository_dir;

    run_sgit_command(
        clone_parent.path(),
        &[
            "clone",
            source.path().to_str().expect("path is valid UTF-8"),
            "cloned",
        ],
    )
    .assert()
    .success();
    let cloned = clone_parent.path().join("cloned");

    // nothing new to send: UpToDate is not a rejection
    run_sgit_command(&cloned, &["push", "origin", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UpToDate"));

    Ok(())
}
