use crate::common::command::{init_repository_dir, run_sgit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rev_list_unresolvable_bound_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_sgit_command(repository_dir.path(), &["rev-list", "--from", "no-such-rev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot resolve revision 'no-such-rev'",
        ));

    Ok(())
}
