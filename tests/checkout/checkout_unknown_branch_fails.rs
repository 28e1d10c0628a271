use crate::common::command::{init_repository_dir, run_sgit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_unknown_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_sgit_command(repository_dir.path(), &["checkout", "no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot resolve revision 'no-such-branch'",
        ));

    Ok(())
}
