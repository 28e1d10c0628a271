use crate::common::command::{init_repository_dir, repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn push_non_fast_forward_is_rejected(
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

    // the histories diverge: one commit on each side
    write_file(FileSpec::new(
        source.path().join("upstream.txt"),
        "upstream".to_string(),
    ));
    run_sgit_command(source.path(), &["add", "upstream.txt"])
        .assert()
        .success();
    sgit_commit(source.path(), "Upstream moved on")
        .assert()
        .success();

    write_file(FileSpec::new(cloned.join("local.txt"), "local".to_string()));
    run_sgit_command(&cloned, &["add", "local.txt"])
        .assert()
        .success();
    sgit_commit(&cloned, "Local went elsewhere")
        .assert()
        .success();

    run_sgit_command(&cloned, &["push", "origin", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("push rejected"));

    Ok(())
}
