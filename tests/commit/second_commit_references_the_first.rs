use crate::common::command::{head_oid, init_repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn second_commit_references_the_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let first_oid = head_oid(repository_dir.path());

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one, revised".to_string(),
    ));
    run_sgit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    sgit_commit(repository_dir.path(), "Revise 1.txt")
        .assert()
        .success();

    let second_oid = head_oid(repository_dir.path());
    assert_ne!(first_oid, second_oid);

    run_sgit_command(repository_dir.path(), &["cat-file", "-p", &second_oid])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("parent {}", first_oid)));

    Ok(())
}
