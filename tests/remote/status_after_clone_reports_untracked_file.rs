use crate::common::command::{init_repository_dir, repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn status_after_clone_reports_untracked_file(
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
    write_file(FileSpec::new(
        cloned.join("myNewFile.txt"),
        "This File will be added, sic!".to_string(),
    ));

    let output = run_sgit_command(&cloned, &["status"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "?? myNewFile.txt\n");

    Ok(())
}
