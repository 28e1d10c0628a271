use crate::common::command::{
    head_oid, init_repository_dir, repository_dir, run_sgit_command, sgit_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_commit_push_round_trip(
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

    write_file(FileSpec::new(
        cloned.join("myNewFile.txt"),
        "This File will be added, sic!".to_string(),
    ));
    run_sgit_command(&cloned, &["add", "myNewFile.txt"])
        .assert()
        .success();
    sgit_commit(&cloned, "test commit").assert().success();

    // the local HEAD commit carries the message
    let local_head = head_oid(&cloned);
    run_sgit_command(&cloned, &["cat-file", "-p", &local_head])
        .assert()
        .success()
        .stdout(predicate::str::contains("test commit"));

    run_sgit_command(&cloned, &["push", "origin", "master"])
        .assert()
        .success();

    // the origin's HEAD commit carries the message too
    let origin_head = head_oid(source.path());
    assert_eq!(origin_head, local_head);
    run_sgit_command(source.path(), &["cat-file", "-p", &origin_head])
        .assert()
        .success()
        .stdout(predicate::str::contains("test commit"));

    Ok(())
}
