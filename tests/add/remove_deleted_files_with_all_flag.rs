use crate::common::command::{init_repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::delete_path;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;

#[rstest]
fn remove_deleted_files_with_all_flag(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    delete_path(&repository_dir.path().join("a").join("2.txt"));

    run_sgit_command(repository_dir.path(), &["add", "-A", "."])
        .assert()
        .success();

    // the deletion is staged now
    run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DR a/2.txt"));

    sgit_commit(repository_dir.path(), "Delete a/2.txt")
        .assert()
        .success();

    // gone from the committed tree, the other files survived
    run_sgit_command(repository_dir.path(), &["ls-tree", "-r", "HEAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a/2.txt").not())
        .stdout(predicate::str::contains("1.txt"))
        .stdout(predicate::str::contains("a/b/3.txt"));

    Ok(())
}
