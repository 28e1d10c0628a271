use crate::common::command::{init_repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_staged_file_as_added(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    let new_file = FileSpec::new(
        repository_dir.path().join("myNewFile.txt"),
        "This File will be added, sic!".to_string(),
    );
    write_file(new_file);

    run_sgit_command(repository_dir.path(), &["add", "myNewFile.txt"])
        .assert()
        .success();

    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    // staged but not yet committed: added against the index, untracked in
    // the repository
    assert_eq!(stdout, "A? myNewFile.txt\n");

    Ok(())
}
