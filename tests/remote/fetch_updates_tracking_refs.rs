use crate::common::command::{
    head_oid, init_repository_dir, repository_dir, run_sgit_command, sgit_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn fetch_updates_tracking_refs(
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

    // upstream gains a commit
    write_file(FileSpec::new(
        source.path().join("upstream.txt"),
        "upstream".to_string(),
    ));
    run_sgit_command(source.path(), &["add", "upstream.txt"])
        .assert()
        .success();
    sgit_commit(source.path(), "Upstream commit")
        .assert()
        .success();
    let upstream_head = head_oid(source.path());

    run_sgit_command(&cloned, &["fetch", "origin"])
        .assert()
        .success();

    let tracking = std::fs::read_to_string(
        cloned
            .join(".git")
            .join("refs")
            .join("remotes")
            .join("origin")
            .join("master"),
    )?;
    assert_eq!(tracking.trim(), upstream_head);

    // the fetched commit is readable from the local database
    run_sgit_command(&cloned, &["cat-file", "-p", &upstream_head])
        .assert()
        .success();

    Ok(())
}
