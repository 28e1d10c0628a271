use crate::common::command::{init_repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;

#[rstest]
fn ignored_files_are_skipped(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join(".gitignore"),
        "*.log\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("debug.log"),
        "noise".to_string(),
    ));

    run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("?? .gitignore"))
        .stdout(predicate::str::contains("debug.log").not());

    Ok(())
}
