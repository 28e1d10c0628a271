use crate::common::command::{repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;

#[rstest]
fn ignored_files_are_not_staged(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join(".gitignore"),
        "*.tmp\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("scratch.tmp"),
        "scratch".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("kept.txt"),
        "kept".to_string(),
    ));

    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    run_sgit_command(repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("H kept.txt"))
        .stdout(predicate::str::contains("scratch.tmp").not());

    Ok(())
}
