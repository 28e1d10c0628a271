use crate::common::command::{repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_single_file_to_index(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("hello.txt"),
        "hello".to_string(),
    ));

    run_sgit_command(repository_dir.path(), &["add", "hello.txt"])
        .assert()
        .success();

    let output = run_sgit_command(repository_dir.path(), &["ls-files"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "H hello.txt\n");

    Ok(())
}
