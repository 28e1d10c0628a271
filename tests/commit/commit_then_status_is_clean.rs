use crate::common::command::{init_repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

// add + commit round-trip: a freshly committed path disappears from the
// status output entirely.
#[rstest]
fn commit_then_status_is_clean(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("fresh.txt"),
        "fresh".to_string(),
    ));

    run_sgit_command(repository_dir.path(), &["add", "fresh.txt"])
        .assert()
        .success();
    sgit_commit(repository_dir.path(), "Add fresh.txt")
        .assert()
        .success();

    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "");

    Ok(())
}
