use crate::common::command::{head_oid, init_repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

// Checking out a tree with fewer tracked files reconciles the working
// directory: the surplus files are deleted, not left behind as untracked.
#[rstest]
fn checkout_removes_files_absent_from_target(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let first_oid = head_oid(repository_dir.path());

    write_file(FileSpec::new(
        repository_dir.path().join("c").join("extra.txt"),
        "extra".to_string(),
    ));
    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    sgit_commit(repository_dir.path(), "Add c/extra.txt")
        .assert()
        .success();

    // a branch still pointing at the first commit
    std::fs::write(
        repository_dir
            .path()
            .join(".git")
            .join("refs")
            .join("heads")
            .join("old"),
        format!("{}\n", first_oid),
    )?;

    run_sgit_command(repository_dir.path(), &["checkout", "old"])
        .assert()
        .success();

    assert!(!repository_dir.path().join("c").join("extra.txt").exists());
    // the emptied directory goes with it
    assert!(!repository_dir.path().join("c").exists());
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("1.txt"))?,
        "one"
    );

    // nothing untracked is left over
    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;
    assert_eq!(stdout, "");

    Ok(())
}
