use crate::common::command::{repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (path, content) in [("1.txt", "one"), ("a/2.txt", "two"), ("a/b/3.txt", "three")] {
        write_file(FileSpec::new(
            repository_dir.path().join(path),
            content.to_string(),
        ));
    }

    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let output = run_sgit_command(repository_dir.path(), &["ls-files"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    // canonical index order
    assert_eq!(stdout, "H 1.txt\nH a/2.txt\nH a/b/3.txt\n");

    Ok(())
}
