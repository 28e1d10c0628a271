use crate::common::command::{head_oid, repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

// A commit on an unresolvable HEAD carries an empty parent list, not a
// placeholder id.
#[rstest]
fn root_commit_has_no_parents(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("hello.txt"),
        "hello".to_string(),
    ));
    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    sgit_commit(repository_dir.path(), "first commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[\(root-commit\) [0-9a-f]{40}\] first commit",
        )?);

    let oid = head_oid(repository_dir.path());
    run_sgit_command(repository_dir.path(), &["cat-file", "-p", &oid])
        .assert()
        .success()
        .stdout(predicate::str::contains("parent").count(0))
        .stdout(predicate::str::contains("first commit"));

    Ok(())
}
