use crate::common::command::{init_repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

// A held lock on the branch ref surfaces as a commit failure; the commit
// object itself is written, the ref is not moved.
#[rstest]
fn commit_while_head_ref_is_locked_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("blocked.txt"),
        "blocked".to_string(),
    ));
    run_sgit_command(repository_dir.path(), &["add", "blocked.txt"])
        .assert()
        .success();

    // a competing writer holds the ref
    let lock_path = repository_dir
        .path()
        .join(".git")
        .join("refs")
        .join("heads")
        .join("master.lock");
    std::fs::write(&lock_path, "")?;

    sgit_commit(repository_dir.path(), "Never lands")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reflog locked"));

    std::fs::remove_file(&lock_path)?;

    // with the lock gone the same commit goes through
    sgit_commit(repository_dir.path(), "Lands now")
        .assert()
        .success();

    Ok(())
}
