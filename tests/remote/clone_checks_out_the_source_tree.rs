use crate::common::command::{init_repository_dir, repository_dir, run_sgit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn clone_checks_out_the_source_tree(
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

    assert_eq!(std::fs::read_to_string(cloned.join("1.txt"))?, "one");
    assert_eq!(
        std::fs::read_to_string(cloned.join("a").join("b").join("3.txt"))?,
        "three"
    );

    // HEAD is symbolic on the detected branch
    let head = std::fs::read_to_string(cloned.join(".git").join("HEAD"))?;
    assert_eq!(head.trim(), "ref: refs/heads/master");

    // the remote is recorded with a wildcard fetch refspec
    let config = std::fs::read_to_string(cloned.join(".git").join("config"))?;
    assert!(config.contains("[remote \"origin\"]"));
    assert!(config.contains("+refs/heads/*:refs/remotes/origin/*"));

    Ok(())
}
