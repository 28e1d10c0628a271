use crate::common::command::{init_repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_files_with_modified_contents(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // same length as the committed content so only the timestamp and the
    // blob id can give the change away
    let modified = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "trees".to_string(),
    );
    write_file(modified);

    let output = run_sgit_command(repository_dir.path(), &["status"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "M- a/b/3.txt\n");

    Ok(())
}
