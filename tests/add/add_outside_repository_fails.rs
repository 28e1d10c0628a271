use crate::common::command::{repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn add_outside_repository_fails(
    repository_dir: TempDir,
    #[from(repository_dir)] other_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let outside = other_dir.path().join("outside.txt");
    write_file(FileSpec::new(outside.clone(), "elsewhere".to_string()));

    run_sgit_command(
        repository_dir.path(),
        &["add", outside.to_str().expect("path is valid UTF-8")],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("outside the repository"));

    Ok(())
}
